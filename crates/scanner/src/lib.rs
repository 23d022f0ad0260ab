pub mod format;
pub mod guard;
pub mod scan;
pub mod yahoo;

pub use guard::AlertGuard;
pub use scan::Scanner;
pub use yahoo::YahooClient;
