mod filters;
mod pagination;
mod user;

pub use filters::{FilterField, FilterKey, FilterUpdate, UserFilters};
pub use pagination::{page_count, PaginationParams, USERS_PER_PAGE};
pub use user::{
    Address, Bank, Company, Coordinates, Crypto, Gender, Hair, Role, User, UsersResponse,
};
