pub use super::confession::Entity as Confession;
pub use super::confession_guild::Entity as ConfessionGuild;
