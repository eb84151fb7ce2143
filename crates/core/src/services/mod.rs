pub mod typeahead;
pub mod watchlist_store;
