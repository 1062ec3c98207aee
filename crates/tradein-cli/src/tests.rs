use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["tradein"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_scrape_with_model_flags() {
    let cli = Cli::try_parse_from([
        "tradein",
        "scrape",
        "--purchase-device-model",
        "Galaxy Z Fold4 5G | Flip4 5G",
        "--selected-model",
        "Galaxy Z Fold4 5G",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            ref purchase_device_model,
            ref selected_model,
            brand: None,
            clean: false,
        }) if purchase_device_model == "Galaxy Z Fold4 5G | Flip4 5G"
            && selected_model == "Galaxy Z Fold4 5G"
    ));
}

#[test]
fn parses_scrape_brand_filter() {
    let cli = Cli::try_parse_from([
        "tradein",
        "scrape",
        "--purchase-device-model",
        "A",
        "--selected-model",
        "B",
        "--brand",
        "apple",
        "--clean",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            brand: Some(Brand::Apple),
            clean: true,
            ..
        })
    ));
}

#[test]
fn rejects_unknown_brand() {
    let result = Cli::try_parse_from([
        "tradein",
        "scrape",
        "--purchase-device-model",
        "A",
        "--selected-model",
        "B",
        "--brand",
        "nokia",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_clean_with_default_output() {
    let cli = Cli::try_parse_from([
        "tradein",
        "clean",
        "--input",
        "Scraped_Phone_Details_27-01-2025.csv",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Clean { ref input, output: None })
            if input == &PathBuf::from("Scraped_Phone_Details_27-01-2025.csv")
    ));
}

#[test]
fn clean_requires_input() {
    assert!(Cli::try_parse_from(["tradein", "clean"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
