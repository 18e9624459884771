use super::*;

#[test]
fn parses_locations_command() {
    let cli = Cli::try_parse_from(["freemeals", "locations"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Locations));
    assert!(!cli.json);
}

#[test]
fn list_defaults_to_all_locations() {
    let cli = Cli::try_parse_from(["freemeals", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::List { ref location } if location == "All"
    ));
}

#[test]
fn list_accepts_location_filter() {
    let cli = Cli::try_parse_from(["freemeals", "list", "--location", "Milton Keynes"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::List { ref location } if location == "Milton Keynes"
    ));
}

#[test]
fn show_requires_index() {
    assert!(Cli::try_parse_from(["freemeals", "show"]).is_err());
}

#[test]
fn show_rejects_negative_index() {
    assert!(Cli::try_parse_from(["freemeals", "show", "--", "-1"]).is_err());
}

#[test]
fn parses_show_with_short_location() {
    let cli = Cli::try_parse_from(["freemeals", "show", "3", "-l", "York"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Show { index: 3, ref location } if location == "York"
    ));
}

#[test]
fn json_flag_is_global() {
    let cli = Cli::try_parse_from(["freemeals", "map", "--json"]).unwrap();
    assert!(cli.json);
    assert!(matches!(cli.command, Commands::Map { .. }));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["freemeals"]).is_err());
}

#[test]
fn ensure_loaded_reports_fetch_failures() {
    let transition = ViewState::default().apply(Event::FilterChanged("All".to_owned()));
    let ticket = transition.fetch.unwrap().ticket;
    let failed = transition
        .state
        .apply(Event::FetchFailed {
            ticket,
            message: "HTTP error: timed out".to_owned(),
        })
        .state;

    let err = ensure_loaded(&failed).unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert!(ensure_loaded(&ViewState::default()).is_ok());
}
