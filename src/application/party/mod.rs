pub mod create_party;
pub mod delete_party;
pub mod get_party;
pub mod list_parties;
pub mod update_party;

pub use create_party::{CreatePartyCommand, CreatePartyResponse, CreatePartyUseCase};
pub use delete_party::{DeletePartyCommand, DeletePartyUseCase};
pub use get_party::{GetPartyCommand, GetPartyUseCase};
pub use list_parties::{ListPartiesCommand, ListPartiesResponse, ListPartiesUseCase, PartyDto};
pub use update_party::{UpdatePartyCommand, UpdatePartyResponse, UpdatePartyUseCase};
