//! Weighted down-sampling of a stream, recycling evicted allocations.
//!
//! `Varopt::show` hands evicted items back by value, so a producer can reuse the
//! allocation for its next record instead of allocating one per item.

use fukubiki::varopt::Varopt;
use fukubiki::{float64, shuffle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug)]
struct Record {
    letter: char,
    index: usize,
    weight: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut sample: Varopt<Box<Record>> = Varopt::new(6);

    let mut spare: Option<Box<Record>> = None;
    let mut allocations = 0usize;

    let mut letters: Vec<char> = ('a'..='z').collect();
    shuffle(&mut letters, &mut rng);

    for (index, &letter) in letters.iter().enumerate() {
        let weight = float64(&mut rng);
        let mut record = spare.take().unwrap_or_else(|| {
            allocations += 1;
            Box::new(Record {
                letter: ' ',
                index: 0,
                weight: 0.0,
            })
        });
        *record = Record {
            letter,
            index,
            weight,
        };

        // An evicted record is no longer in the sample and may be recycled.
        spare = sample.try_show_with_rng(record, weight, &mut rng)?;
    }

    println!("threshold: {:.4}", sample.threshold());
    for r in sample.iter() {
        println!("  {} (#{:2})  w={:.4}", r.letter, r.index, r.weight);
    }
    println!("{} records shown, {} boxes allocated", letters.len(), allocations);

    Ok(())
}
