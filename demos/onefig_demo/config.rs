//! Configuration records for the onefig demo application.
//!
//! A root [`DemoConfig`] with two nested sections, [`ServerConfig`] and
//! [`DisplayConfig`], to show how the path chain shapes TOML sections and
//! derived names.
//!
//! # Env var mapping
//!
//! With the prefix `ONEFIG_DEMO_` (derived from `app_name`) and derived names
//! enabled:
//!
//! | Env var                              | Config key               |
//! |--------------------------------------|--------------------------|
//! | `ONEFIG_DEMO_NAME`                   | `name`                   |
//! | `ONEFIG_DEMO_VERBOSE`                | `verbose`                |
//! | `ONEFIG_DEMO_SERVER_HOST`            | `server.host`            |
//! | `ONEFIG_DEMO_PORT`                   | `server.port` (explicit) |
//! | `ONEFIG_DEMO_SERVER_MAX_CONNECTIONS` | `server.max_connections` |
//! | `ONEFIG_DEMO_DISPLAY_COLOR`          | `display.color`          |
//! | `ONEFIG_DEMO_DISPLAY_FORMAT`         | `display.format`         |

use onefig::{Meta, OnefigError, Settings, Walker};

#[derive(Debug, Default)]
pub struct DemoConfig {
    pub name: String,
    pub verbose: bool,
    pub server: ServerConfig,
    pub display: DisplayConfig,
    /// Set by the program itself; not configurable from outside.
    pub session_token: String,
}

#[derive(Debug, Default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

#[derive(Debug, Default)]
pub struct DisplayConfig {
    pub color: String,
    pub format: String,
}

impl Settings for DemoConfig {
    fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
        w.leaf(
            "name",
            Meta::new()
                .default("onefig-demo")
                .help("Application name shown in the echo banner."),
            &mut self.name,
        )?;
        w.leaf(
            "verbose",
            Meta::new()
                .default("false")
                .short('v')
                .long("verbose")
                .help("Enable verbose output."),
            &mut self.verbose,
        )?;
        w.nested("server", &mut self.server)?;
        w.nested("display", &mut self.display)?;
        w.leaf(
            "session_token",
            Meta::new().env("-").long("-"),
            &mut self.session_token,
        )
    }
}

impl Settings for ServerConfig {
    fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
        w.leaf(
            "host",
            Meta::new()
                .default("127.0.0.1")
                .long("host")
                .help("Hostname to bind to."),
            &mut self.host,
        )?;
        w.leaf(
            "port",
            Meta::new()
                .default("3000")
                .short('p')
                .env("PORT")
                .help("Port number."),
            &mut self.port,
        )?;
        w.leaf(
            "max_connections",
            Meta::new()
                .default("100")
                .help("Maximum number of allowed connections."),
            &mut self.max_connections,
        )
    }
}

impl Settings for DisplayConfig {
    fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
        w.leaf(
            "color",
            Meta::new()
                .default("yellow")
                .short('c')
                .long("color")
                .help("Terminal color for echo output (red, green, yellow, blue, magenta, cyan, white)."),
            &mut self.color,
        )?;
        w.leaf(
            "format",
            Meta::new()
                .default("pretty")
                .help("Output format (pretty or plain)."),
            &mut self.format,
        )
    }
}
