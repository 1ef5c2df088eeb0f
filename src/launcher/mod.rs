pub mod app;
pub mod assets;
pub mod input;
pub mod process;
pub mod sound;
pub mod view_state;
pub mod wrap;

pub use app::LauncherApp;
pub use process::{ProcessLauncher, SpawnError, SystemLauncher};
pub use view_state::{Effect, LauncherEvent, Step, ViewState};
