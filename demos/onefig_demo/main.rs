//! # onefig demo application
//!
//! A sample CLI tool that shows how to wire [onefig](https://docs.rs/onefig)
//! into an application. It exists purely to demonstrate and manually verify
//! onefig's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example onefig_demo
//! cargo run --example onefig_demo -- --help
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                  | How to exercise it                                                  |
//! |--------------------------|---------------------------------------------------------------------|
//! | Compiled defaults        | `cargo run --example onefig_demo`                                   |
//! | Config file (cwd)        | Create `onefig-demo.toml` in cwd, then run                          |
//! | Config file (home)       | Place the file under `~/.onefig-demo/` or the platform config dir   |
//! | Explicit env name        | `ONEFIG_DEMO_PORT=9999 cargo run --example onefig_demo`             |
//! | Derived env name         | `ONEFIG_DEMO_DISPLAY_COLOR=red cargo run --example onefig_demo`     |
//! | Short flag with value    | `cargo run --example onefig_demo -- -p 8080`                        |
//! | Clustered short flags    | `cargo run --example onefig_demo -- -vc blue`                       |
//! | Derived long flag        | `cargo run --example onefig_demo -- --server-max-connections=5`     |
//! | Help                     | `cargo run --example onefig_demo -- --help`                         |
//! | Template                 | `cargo run --example onefig_demo -- template`                       |
//! | Logging                  | `RUST_LOG=onefig=trace cargo run --example onefig_demo`             |

mod config;

use onefig::{Onefig, OnefigBuilder, OrExit, SearchPath};
use tracing_subscriber::EnvFilter;

use config::DemoConfig;

/// Search paths: Platform (XDG / Library) → `~/.onefig-demo/` → cwd.
/// Env prefix: `ONEFIG_DEMO_` (auto-derived).
fn make_builder() -> OnefigBuilder<DemoConfig> {
    Onefig::builder()
        .app_name("onefig-demo")
        .search_paths(vec![
            SearchPath::Platform,
            SearchPath::Home(".onefig-demo"),
            SearchPath::Cwd,
        ])
        .use_names(true)
        .strict(true)
}

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

fn echo_all(config: &DemoConfig) {
    let color = ansi_color_code(&config.display.color);

    if config.verbose {
        println!(
            "{color}[verbose] Resolved configuration for {:?}{RESET}",
            config.name
        );
        println!(
            "{color}[verbose] Session token set: {}{RESET}",
            !config.session_token.is_empty()
        );
        println!();
    }

    let entries = [
        ("name", config.name.clone()),
        ("verbose", config.verbose.to_string()),
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
        (
            "server.max_connections",
            config.server.max_connections.to_string(),
        ),
        ("display.color", config.display.color.clone()),
        ("display.format", config.display.format.clone()),
    ];

    if config.display.format == "plain" {
        for (key, value) in &entries {
            println!("{key}={value}");
        }
    } else {
        let max_key_len = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in &entries {
            println!("{color}{key:<max_key_len$}{RESET}  {value}");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let builder = make_builder();
    let args = builder.parsed_args().unwrap_or_default();

    if args.help_requested() {
        println!("Usage: onefig-demo [OPTIONS] [template]\n");
        print!("{}", builder.help().or_exit());
        return;
    }

    if args.positionals().first().map(String::as_str) == Some("template") {
        print!("{}", builder.template().or_exit());
        return;
    }

    let mut config = DemoConfig {
        session_token: "generated-at-startup".into(),
        ..DemoConfig::default()
    };
    builder.load_into(&mut config).or_exit();
    echo_all(&config);
}
