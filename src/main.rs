use crate::backend::SchedulingBackend;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::database_interface::DatabaseInterface;
use crate::http::start_server;
use crate::local_schedule::LocalSchedule;
use crate::scheduler::Scheduler;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod database_interface;
mod errors;
mod http;
mod local_schedule;
mod local_time;
mod schema;
mod scheduler;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
pub struct AppState<B: SchedulingBackend> {
    pub scheduler: Scheduler<B>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    info!("meeting scheduler starting");

    let configuration = ConfigurationHandler::parse_arguments();
    match configuration.database_url() {
        Some(database_url) => {
            let backend = connect_with_retry(&database_url).await;
            run(backend, &configuration.port()).await;
        }
        None => {
            info!("no database configured, keeping slots in memory");
            run(LocalSchedule::default(), &configuration.port()).await;
        }
    }
}

async fn run<B: SchedulingBackend>(backend: B, port: &str) {
    let state = AppState {
        scheduler: Scheduler::new(backend),
    };
    start_server(state, port).await;
}

// Container setups regularly start this service before the database is
// ready, so keep trying.
async fn connect_with_retry(database_url: &str) -> DatabaseInterface {
    loop {
        match DatabaseInterface::new(database_url) {
            Ok(interface) => {
                info!("connected to PostgreSQL");
                return interface;
            }
            Err(err) => {
                error!("database connection failed: {err}, retrying in 1s");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
