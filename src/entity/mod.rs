pub mod audit_logs;
pub mod client_menus;
pub mod day_dishes;
pub mod days;
pub mod dishes;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use client_menus::Entity as ClientMenus;
pub use day_dishes::Entity as DayDishes;
pub use days::Entity as Days;
pub use dishes::Entity as Dishes;
pub use users::Entity as Users;
