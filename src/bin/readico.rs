use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if env::args().count() != 2 {
        println!("Usage: readico <path>");
        return;
    }
    let path = env::args().nth(1).unwrap_or_default();
    let dir = match File::open(&path).and_then(|file| ico::IconDir::read(BufReader::new(file))) {
        Ok(dir) => dir,
        Err(err) => {
            log::error!("failed to read {}: {}", path, err);
            process::exit(1);
        }
    };
    println!("ICO file contains {} image(s).", dir.entries().len());
    for (index, entry) in dir.entries().iter().enumerate() {
        println!("Image {}: {}x{}, {} bpp, {} ({} byte payload)",
                 index,
                 entry.width(),
                 entry.height(),
                 entry.bits_per_pixel(),
                 if entry.is_png() { "PNG" } else { "BMP" },
                 entry.data().len());
    }
}
