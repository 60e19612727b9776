pub mod scripted_prober;
pub mod target_server;
