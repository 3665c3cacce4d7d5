pub mod list_flows;
pub mod run_flow;
