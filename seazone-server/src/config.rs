use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use directories::ProjectDirs;
use seazone_core::MissingCoordinates;

/// File name of the dataset inside the platform data directory
pub const DATASET_FILE_NAME: &str = "zones.json";

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Address to listen on
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Port for the REST API
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// JSON dataset with zones, species and paths
    ///
    /// Defaults to zones.json in the platform data directory; a missing
    /// default file starts the server with an empty dataset.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Fail nearest-zone lookups when a candidate zone lacks coordinates
    /// instead of skipping that zone
    #[arg(long, default_value_t = false)]
    pub reject_uncoordinated_zones: bool,
}

impl Cli {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn missing_coordinates(&self) -> MissingCoordinates {
        if self.reject_uncoordinated_zones {
            MissingCoordinates::Reject
        } else {
            MissingCoordinates::Skip
        }
    }
}

/// Default dataset location, e.g. `~/.local/share/seazone/zones.json` on Linux
pub fn default_data_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "SeaZone", "seazone")
        .map(|dirs| dirs.data_dir().join(DATASET_FILE_NAME))
}
