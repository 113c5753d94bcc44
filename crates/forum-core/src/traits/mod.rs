//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CategoryRepository, PostRepository, ReactionRepository, RepoResult, RoleRepository,
    TagRepository, TopicFilter, TopicRepository, UserFilter, UserRepository,
};
