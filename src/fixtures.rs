#[cfg(test)]
pub mod test {
    use crate::error::OnefigError;
    use crate::schema::{Meta, Settings};
    use crate::walk::Walker;

    #[derive(Debug, Default, PartialEq)]
    pub struct TestConfig {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        pub offset: i32,
        pub ratio: f64,
        pub database: DbConfig,
        /// Internal field: never documented, never read from env or flags.
        pub secret: String,
        /// Unsupported type, not declared in the schema.
        pub tags: Vec<String>,
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct DbConfig {
        pub url: String,
        pub pool_size: usize,
    }

    impl Settings for TestConfig {
        fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
            w.leaf(
                "host",
                Meta::new()
                    .default("localhost")
                    .short('H')
                    .long("host")
                    .help("The application host."),
                &mut self.host,
            )?;
            w.leaf(
                "port",
                Meta::new()
                    .default("8080")
                    .short('p')
                    .env("PORT")
                    .help("The port number."),
                &mut self.port,
            )?;
            w.leaf(
                "debug",
                Meta::new()
                    .default("false")
                    .short('d')
                    .long("debug")
                    .help("Enable debug mode."),
                &mut self.debug,
            )?;
            w.leaf(
                "offset",
                Meta::new().default("-5").help("Signed offset."),
                &mut self.offset,
            )?;
            w.leaf(
                "ratio",
                Meta::new()
                    .default("0.5")
                    .env("-")
                    .long("-")
                    .help("Sampling ratio."),
                &mut self.ratio,
            )?;
            w.nested("database", &mut self.database)?;
            w.leaf("secret", Meta::new().env("-").long("-"), &mut self.secret)
        }
    }

    impl Settings for DbConfig {
        fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
            w.leaf(
                "url",
                Meta::new()
                    .env("DATABASE_URL")
                    .help("Connection string URL."),
                &mut self.url,
            )?;
            w.leaf(
                "pool_size",
                Meta::new().default("5").help("Connection pool size."),
                &mut self.pool_size,
            )
        }
    }

    /// A schema with no metadata at all, relying entirely on derived names.
    #[derive(Debug, Default, PartialEq)]
    pub struct BareConfig {
        pub x: u32,
        pub d: BareSection,
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct BareSection {
        pub f: String,
    }

    impl Settings for BareConfig {
        fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
            w.leaf("x", Meta::new().default("12"), &mut self.x)?;
            w.nested("d", &mut self.d)
        }
    }

    impl Settings for BareSection {
        fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
            w.leaf("f", Meta::new(), &mut self.f)
        }
    }

    #[test]
    fn test_config_loads_defaults() {
        let mut config = TestConfig::default();
        crate::defaults::load_defaults(&mut config).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.offset, -5);
        assert_eq!(config.ratio, 0.5);
        assert_eq!(config.database.url, "");
        assert_eq!(config.database.pool_size, 5);
        assert!(config.tags.is_empty());
    }
}
