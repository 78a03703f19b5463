use std::io::{self, Read};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use farol::{Renderer, SceneDescription};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let description: SceneDescription = serde_json::from_str(&raw)?;
    let output_path = description.output_path.clone();
    let renderer = Arc::new(Renderer::new(description.build()?));

    // Status line the way a polling front end would read it.
    let poller = {
        let renderer = Arc::clone(&renderer);
        thread::spawn(move || loop {
            let percent = renderer.progress();
            info!("progress: {percent}%");
            if percent == 100 {
                break;
            }
            thread::sleep(Duration::from_millis(250));
        })
    };

    let started = Instant::now();
    let image = match renderer.render() {
        Ok(image) => image,
        // The poller never reaches 100 on a failed render; it dies with
        // the process when main returns the error.
        Err(error) => return Err(error.into()),
    };
    let elapsed_ms = started.elapsed().as_millis();
    let _ = poller.join();

    image.save(&output_path)?;

    let viewport = renderer.scene().viewport;
    println!(
        "Rendered {}x{} in {} ms: {}",
        viewport.pixel_width, viewport.pixel_height, elapsed_ms, output_path
    );

    Ok(())
}
