use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use shoal::algorithms::particles::{SwarmPositionInitializer, TrackingObserver};
use shoal::prelude::*;
use shoal::test_functions::{Ackley, Rastrigin};

fn configure_logger() -> Result<(), Box<dyn Error>> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S%.3f)} [{h({l})}] {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    configure_logger()?;

    // Local-best swarm on the (multimodal) Rastrigin function
    let bounds = Bounds::new(vec![-5.12; 2], vec![5.12; 2])?;
    let options = PSOOptions::new(0.5, 0.3, 0.9).with_k(3).with_p(2);

    // Create a tracker to record swarm history
    let tracker = TrackingObserver::build();

    let mut pso = LocalBestPSO::new(50, 2, options, Some(bounds))?
        .with_seed(0)
        .with_position_initializer(SwarmPositionInitializer::LatinHypercube)
        .with_verbosity(Verbosity::Progress)
        .with_print_step(50)
        .with_observer(tracker.clone());

    // Run the particle swarm optimizer
    let result = pso.optimize(&Rastrigin, 200, &mut ())?;
    println!("{}", result);

    // Export the results to a Python .pkl file to visualize via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("data.pkl"))?);
    serde_pickle::to_writer(&mut writer, &*tracker.read(), Default::default())?;

    // Global-best swarm on the Ackley function with clamped velocities
    let bounds = Bounds::new(vec![-32.0; 5], vec![32.0; 5])?;
    let options = PSOOptions::new(0.5, 0.3, 0.9).with_velocity_clamp(-4.0, 4.0);
    let mut pso = GlobalBestPSO::new(30, 5, options, Some(bounds))?.with_seed(0);
    let result = pso.optimize(&Ackley, 500, &mut ())?;
    println!("{}", result);
    Ok(())
}
