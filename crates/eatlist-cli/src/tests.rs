use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["eatlist"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_sync_without_flags() {
    let cli = Cli::try_parse_from(["eatlist", "sync"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sync {
            csv_url: None,
            output: None,
            stdout: false
        })
    ));
}

#[test]
fn parses_sync_with_overrides() {
    let cli = Cli::try_parse_from([
        "eatlist",
        "sync",
        "--csv-url",
        "https://example.com/sheet.csv",
        "-o",
        "public/restaurants.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sync {
            csv_url: Some(ref url),
            output: Some(ref path),
            stdout: false
        }) if url == "https://example.com/sheet.csv"
            && path == &PathBuf::from("public/restaurants.json")
    ));
}

#[test]
fn parses_sync_stdout() {
    let cli = Cli::try_parse_from(["eatlist", "sync", "--stdout"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sync { stdout: true, .. })
    ));
}

#[test]
fn stdout_conflicts_with_output() {
    let result = Cli::try_parse_from(["eatlist", "sync", "--stdout", "--output", "x.json"]);
    assert!(result.is_err());
}

#[test]
fn parses_check_command() {
    let cli = Cli::try_parse_from(["eatlist", "check", "--csv-url", "https://example.com/a.csv"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Check { csv_url: Some(ref url) }) if url == "https://example.com/a.csv"
    ));
}

#[test]
fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["eatlist", "publish"]).is_err());
}
