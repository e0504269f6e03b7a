use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tower::BoxError;

use places_client::{
    adapters::{
        deeplink::{wikipedia, OpenerDeepLinks, SystemUrlOpener, WikipediaAdapter},
        remote::{HttpClient, RemotePlaceSource},
        repository::RemotePlaceRepository,
    },
    commands::DomainLogic,
    config::Config,
    domain::Place,
    presentation::{AddPlaceSheet, PlaceListModel, ViewState},
    telemetry,
};

/// List places and open them in the Wikipedia app
#[derive(Parser, Debug)]
#[command(name = "places", version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the place list
    List,
    /// Open the Nth place (1-based) in Wikipedia
    Open { index: usize },
    /// Add a custom place to the list
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        long: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.config.log_level)?;

    let client = HttpClient::new(cli.config.network())?;
    let repository = RemotePlaceRepository::new(RemotePlaceSource::new(client));
    let opener = WikipediaAdapter::new(OpenerDeepLinks::new(SystemUrlOpener));
    let domain = DomainLogic::new(repository, opener);
    let model = PlaceListModel::new(domain.clone(), domain);

    model.load_places().await;
    let command = cli.command.unwrap_or(Command::List);
    if let ViewState::Error { message, .. } = model.state() {
        eprintln!("{message}");
        // A custom place can still be added to an empty list
        if !matches!(command, Command::Add { .. }) {
            return Ok(ExitCode::FAILURE);
        }
    }

    match command {
        Command::List => print_places(&model.places()),
        Command::Open { index } => {
            let places = model.places();
            let Some(place) = index.checked_sub(1).and_then(|i| places.get(i).cloned()) else {
                eprintln!("no place at position {index}");
                return Ok(ExitCode::FAILURE);
            };
            model.open_place(place.clone()).await;
            if let Some(err) = model.open_error() {
                eprintln!("{err}");
                model.dismiss_open_error();
                return Ok(ExitCode::FAILURE);
            }
            println!(
                "Opened {} at {}",
                wikipedia::APP_NAME,
                place.formatted_coordinates()
            );
        }
        Command::Add { name, lat, long } => {
            let (mut sheet, completion) = AddPlaceSheet::present();
            let form = sheet.form_mut();
            form.name = name;
            form.latitude = lat;
            form.longitude = long;
            form.submit();
            drop(sheet);

            if !model.add_from(completion).await {
                eprintln!("latitude must be within [-90, 90] and longitude within [-180, 180]");
                return Ok(ExitCode::FAILURE);
            }
            print_places(&model.places());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_places(places: &[Place]) {
    for (i, place) in places.iter().enumerate() {
        println!(
            "{:>3}. {} ({})",
            i + 1,
            place.display_name(),
            place.formatted_coordinates()
        );
    }
}
