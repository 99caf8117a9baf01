// Adapters layer: in-process implementations of the rate catalog and customer
// directory ports.

pub mod customers;
pub mod memory;

pub use customers::InMemoryCustomerDirectory;
pub use memory::InMemoryRateRepository;
