use midline::pipeline::{MidlinePipeline, INPUT_FILEPATH, OUTPUT_FILEPATH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    MidlinePipeline::default().run_file(INPUT_FILEPATH, OUTPUT_FILEPATH)?;

    Ok(())
}
