use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_are_applied() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert!(settings.css.stylesheet_enabled);
    assert_eq!(settings.css.stylesheet_path, DEFAULT_STYLESHEET_PATH);
    assert_eq!(settings.page.cards.get(), DEFAULT_PAGE_CARDS);
    assert_eq!(settings.page.title, DEFAULT_PAGE_TITLE);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn stylesheet_overrides_apply() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        stylesheet_path: Some("/assets/app.css".to_string()),
        stylesheet_enabled: Some(false),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.css.stylesheet_path, "/assets/app.css");
    assert!(!settings.css.stylesheet_enabled);
}

#[test]
fn relative_stylesheet_path_is_rejected() {
    let mut raw = RawSettings::default();
    raw.css.stylesheet_path = Some("styles.css".to_string());
    let err = Settings::from_raw(raw).expect_err("relative path rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "css.stylesheet_path",
            ..
        }
    ));
}

#[test]
fn zero_cards_is_rejected() {
    let mut raw = RawSettings::default();
    raw.apply_page_overrides(&PageOverrides {
        cards: Some(0),
        title: None,
    });
    let err = Settings::from_raw(raw).expect_err("zero cards rejected");
    assert!(matches!(err, LoadError::Invalid { key: "page.cards", .. }));
}

#[test]
fn blank_title_falls_back_to_default() {
    let mut raw = RawSettings::default();
    raw.page.title = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.page.title, DEFAULT_PAGE_TITLE);
}

#[test]
fn invalid_log_level_is_reported() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["weft"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_render_arguments() {
    let args = CliArgs::parse_from([
        "weft",
        "render",
        "--page-cards",
        "5",
        "--output",
        "out.html",
    ]);

    match args.command.expect("render command") {
        Command::Render(render) => {
            assert_eq!(render.page.cards, Some(5));
            assert_eq!(
                render.output.as_deref(),
                Some(std::path::Path::new("out.html"))
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_serve_stylesheet_toggle() {
    let args = CliArgs::parse_from([
        "weft",
        "serve",
        "--stylesheet",
        "off",
        "--server-port",
        "8080",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.stylesheet_enabled, Some(false));
            assert_eq!(serve.overrides.server_port, Some(8080));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
