//! `tzkt init` command — write a starter `tzkt.toml`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tzkt_client::config::generate_default_config;
use tzkt_client::{Error, NetworkId};
use url::Url;

/// Template with `pins` filled into its `[endpoints]` table.
fn render(pins: &[(NetworkId, Url)]) -> String {
    let mut config = generate_default_config();
    for (network, url) in pins {
        config.push_str(&format!("{network} = \"{url}\"\n"));
    }
    config
}

/// Execute the `init` command.
///
/// Missing parent directories are created. An existing file is kept unless
/// `force` is set.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file exists without `force`, or on any
/// I/O failure.
#[allow(clippy::print_stderr)]
pub fn run(output: &Path, pins: &[(NetworkId, Url)], force: bool) -> Result<(), Error> {
    let failed = |e: std::io::Error| Error::config_with(format!("failed to write '{}'", output.display()), e);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(failed)?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(output).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            Error::config(format!(
                "'{}' already exists, use --force to overwrite",
                output.display()
            ))
        } else {
            failed(e)
        }
    })?;
    file.write_all(render(pins).as_bytes()).map_err(failed)?;

    eprintln!("Config file written to {}", output.display());
    Ok(())
}
