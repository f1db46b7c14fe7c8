pub mod context;
pub mod fetch;
pub mod filters;
pub mod resolvers;
pub mod sources;
