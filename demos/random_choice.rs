//! Build float and quantized alias samplers over random weights, validate
//! the tables and compare sampled frequencies against the weights.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use walker_choice::{CHECK_TOLERANCE, CutoffKind, RandomChoice};

const BINS: usize = 9;
const SAMPLES: usize = 100_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("number of bins = {BINS}");
    println!("number of samples = {SAMPLES}");

    let mut rng = Pcg32::seed_from_u64(29411);
    let weights: Vec<f64> = (0..BINS).map(|_| rng.random()).collect();
    let total: f64 = weights.iter().sum();

    for kind in [CutoffKind::Float, CutoffKind::Quantized32] {
        println!("\n{kind:?}");
        let choice = RandomChoice::new(&weights, kind)?;
        if !choice.check(&weights, CHECK_TOLERANCE) {
            return Err(format!("{kind:?} table failed validation").into());
        }
        println!("check succeeded");

        let mut hist = [0u64; BINS];
        for _ in 0..SAMPLES {
            hist[choice.sample_index(&mut rng)] += 1;
        }

        println!("bin\tweight\t\tresult\t\tdiff\t\tsigma\t\tdiff/sigma");
        for (i, (&w, &c)) in weights.iter().zip(&hist).enumerate() {
            let expected = w / total;
            let observed = c as f64 / SAMPLES as f64;
            let diff = (expected - observed).abs();
            let sigma = (c as f64).sqrt() / SAMPLES as f64;
            println!(
                "{i}\t{expected:.6}\t{observed:.6}\t{diff:.6}\t{sigma:.6}\t{:.3}",
                diff / sigma
            );
        }
    }
    Ok(())
}
