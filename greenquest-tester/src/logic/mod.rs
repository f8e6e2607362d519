pub mod driver;
pub mod reports;
pub mod scenarios;
pub mod tester;

pub use scenarios::{SMOKE, catalog_scenarios, find_scenario, list_scenarios};
pub use tester::{LogicTester, ScenarioResult};
