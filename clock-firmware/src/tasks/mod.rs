// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks teilen sich den ClockState (Atomics) und das RefreshSignal.

pub mod display;
pub mod ntp;
pub mod refresh;
pub mod tick;
pub mod weather;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use display::display_task;
pub use refresh::refresh_task;
pub use tick::tick_task;
pub use wifi::{connection_task, dhcp_task, net_task};
