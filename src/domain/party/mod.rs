pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::Party;
pub use errors::PartyError;
pub use ports::PartyRepository;
pub use services::{PartyData, PartyService};
pub use value_objects::{
  Email, Gstin, MobileNumber, PartyAddress, PartyName, Pincode, StateName, ValueObjectError,
};
