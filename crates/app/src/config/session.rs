//! Session Config

use std::path::PathBuf;

use canteen::priority::Role;
use clap::Args;

/// Signed-in user settings.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// Email of the signed-in user
    #[arg(long, env = "CANTEEN_USER_EMAIL")]
    pub email: Option<String>,

    /// University ID of the signed-in user
    #[arg(long, env = "CANTEEN_UNIVERSITY_ID")]
    pub university_id: Option<String>,

    /// Role of the signed-in user (student, faculty)
    #[arg(long, env = "CANTEEN_ROLE", default_value = "student")]
    pub role: Role,

    /// Cart file used while signed out
    #[arg(long, env = "CANTEEN_CART_FILE", default_value = ".canteen-cart.json")]
    pub cart_file: PathBuf,
}
