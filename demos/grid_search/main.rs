use std::error::Error;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use shoal::prelude::*;
use shoal::search::{GridSearch, OptionsGrid, PsoVariant, SearchGoal};
use shoal::test_functions::Sphere;

fn main() -> Result<(), Box<dyn Error>> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("[{l}] {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Debug))?;
    log4rs::init_config(config)?;

    let grid = OptionsGrid::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], vec![0.4, 0.7, 0.9])
        .with_k(vec![5, 10, 15])
        .with_p(vec![1]);
    let search = GridSearch::new(PsoVariant::LocalBest, 40, 20, grid, 10).with_seed(0);

    let (best_score, best_options) = search.search(&Sphere, &mut (), SearchGoal::Minimize)?;
    log::info!("Best score: {}", best_score);
    log::info!("Best options: {:?}", best_options);

    let (worst_score, worst_options) = search.search(&Sphere, &mut (), SearchGoal::Maximize)?;
    log::info!("Worst score: {} with {:?}", worst_score, worst_options);
    Ok(())
}
