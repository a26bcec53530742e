//! Generates the application's icon set from `icons/icon.png`.
//!
//! ```shell
//! cargo run --bin gen_icons [<base-dir>]
//! ```
//!
//! All paths are relative to `<base-dir>`.  Without it, the package
//! directory is used under `cargo run` (from `CARGO_MANIFEST_DIR`), and the
//! directory holding the executable otherwise, so the result does not depend
//! on the caller's working directory.  Writes `icons/32x32.png`,
//! `icons/128x128.png`, `icons/128x128@2x.png` and `icons/icon.ico`.

use icon_builder::{choose_base_dir, BuildConfig, IconBuilder};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if env::args_os().count() > 2 {
        eprintln!("Usage: gen_icons [<base-dir>]");
        process::exit(2);
    }
    let exe = env::current_exe().ok();
    let base = match choose_base_dir(env::args_os().nth(1).map(PathBuf::from),
                                     env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from),
                                     exe.as_deref()) {
        Some(base) => base,
        None => {
            log::error!("cannot determine a base directory; pass one as the first argument");
            process::exit(1);
        }
    };
    let builder = IconBuilder::new(BuildConfig::default().resolve_against(&base));
    log::info!("source: {}", builder.config().source.display());
    match builder.build() {
        Ok(report) => {
            log::info!(
                "{} PNG file(s) and {} with sizes {:?}",
                report.named.len(),
                report.container.path.display(),
                report.container_sizes
            );
        }
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    }
}
