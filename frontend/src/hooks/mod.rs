mod use_entity_list;

pub use use_entity_list::{use_entity_list, EntityList, ListAction, ListState};
