//! In-memory repositories for service tests
//!
//! One `InMemoryStore` implements every repository trait over a single
//! mutex-guarded state, mirroring the PostgreSQL implementations: the same
//! orderings, the same error variants and the same counter bookkeeping.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forum_common::JwtService;
use forum_core::entities::{
    AssignmentState, Category, NewTag, NewUser, Post, Reaction, ReactionKind, ReactionSummary,
    ReactionToggle, ReactionType, Role, RoleAssignment, Tag, TagAssignment, TagCategory,
    ToggleOutcome, Topic, User, UserTag, Vote, VoteOutcome, VoteSlot,
};
use forum_core::traits::{
    CategoryRepository, PostRepository, ReactionRepository, RepoResult, RoleRepository,
    TagRepository, TopicFilter, TopicRepository, UserFilter, UserRepository,
};
use forum_core::value_objects::PageRequest;
use forum_core::{DomainError, Permissions};
use parking_lot::Mutex;
use uuid::Uuid;

use super::authors::default_role;
use super::context::ServiceContext;

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    next_user_id: i64,
    roles: Vec<Role>,
    role_assignments: Vec<RoleAssignment>,
    tags: Vec<Tag>,
    tag_assignments: Vec<TagAssignment>,
    categories: Vec<Category>,
    topics: Vec<Topic>,
    posts: Vec<Post>,
    reaction_types: Vec<ReactionType>,
    reactions: Vec<Reaction>,
}

impl State {
    fn effective_role(&self, user: &User) -> Option<&Role> {
        user.role_id
            .and_then(|id| self.roles.iter().find(|r| r.id == id))
            .or_else(|| default_role(&self.roles))
    }

    fn has_effective_tag(&self, user_id: i64, tag_name: &str, now: DateTime<Utc>) -> bool {
        self.tag_assignments.iter().any(|a| {
            a.user_id == user_id
                && a.is_effective(now)
                && self
                    .tags
                    .iter()
                    .any(|t| t.id == a.tag_id && t.is_active && t.name == tag_name)
        })
    }

    fn users_matching(&self, filter: &UserFilter) -> Vec<User> {
        let now = Utc::now();
        let mut users: Vec<(i32, User)> = self
            .users
            .values()
            .filter_map(|user| {
                let role = self.effective_role(user);
                if let Some(name) = &filter.role {
                    if role.map(|r| &r.name) != Some(name) {
                        return None;
                    }
                }
                if let Some(tag) = &filter.tag {
                    if !self.has_effective_tag(user.id, tag, now) {
                        return None;
                    }
                }
                Some((role.map_or(i32::MIN, |r| r.hierarchy_level), user.clone()))
            })
            .collect();
        users.sort_by(|(la, a), (lb, b)| lb.cmp(la).then_with(|| a.username.cmp(&b.username)));
        users.into_iter().map(|(_, user)| user).collect()
    }

    fn topics_matching(&self, filter: &TopicFilter) -> Vec<Topic> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut topics: Vec<Topic> = self
            .topics
            .iter()
            .filter(|t| filter.category_id.map_or(true, |c| t.category_id == c))
            .filter(|t| {
                needle.as_ref().map_or(true, |n| {
                    t.title.to_lowercase().contains(n) || t.content.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();
        topics.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        topics
    }

    fn post_mut(&mut self, post_id: Uuid) -> RepoResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(DomainError::PostNotFound(post_id))
    }

    /// Toggle a reaction in its slot and return the kind previously held there.
    ///
    /// Holding the same kind again empties the slot; a conflicting kind is
    /// replaced.
    fn toggle_slot(&mut self, reaction: &Reaction) -> RepoResult<Option<ReactionKind>> {
        let held = self.reactions.iter().position(|r| r.conflicts_with(reaction));
        let previous = held.map(|i| self.reactions[i].kind);
        if previous != Some(reaction.kind) {
            self.require_user(reaction.user_id)?;
            self.reactions.push(reaction.clone());
        }
        if let Some(i) = held {
            self.reactions.swap_remove(i);
        }
        Ok(previous)
    }

    fn named_reactions(&self, post_id: Uuid) -> impl Iterator<Item = (i64, i32)> + '_ {
        self.reactions
            .iter()
            .filter(move |r| r.post_id == post_id)
            .filter_map(|r| match r.kind {
                ReactionKind::Named(type_id) => Some((r.user_id, type_id)),
                ReactionKind::Vote(_) => None,
            })
    }

    fn require_user(&self, user_id: i64) -> RepoResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(user_id))
        }
    }
}

fn category_rank(category: TagCategory) -> u8 {
    match category {
        TagCategory::Staff => 0,
        TagCategory::Special => 1,
        TagCategory::Achievement => 2,
        TagCategory::Custom => 3,
    }
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect()
}

/// Shared in-memory store; clones see the same state
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Store with the default roles, tags, reaction types and categories
    pub(crate) fn seeded() -> Self {
        let store = Self::default();
        let now = Utc::now();
        {
            let mut state = store.state.lock();
            state.next_user_id = 1;

            let roles = [
                ("admin", "Administrator", "#DC2626", Permissions::ADMIN, 100),
                ("moderator", "Moderator", "#2563EB", Permissions::MODERATOR, 50),
                ("player", "Player", "#6B7280", Permissions::PLAYER, 10),
            ];
            for (i, (name, display_name, color, permissions, level)) in roles.into_iter().enumerate() {
                state.roles.push(Role {
                    id: i as i32 + 1,
                    name: name.to_string(),
                    display_name: display_name.to_string(),
                    description: None,
                    color: color.to_string(),
                    permissions,
                    hierarchy_level: level,
                    created_at: now,
                    updated_at: now,
                });
            }

            let tags = [
                ("admin-tag", "Admin", TagCategory::Staff),
                ("mod-tag", "Moderator", TagCategory::Staff),
                ("founder", "Founder", TagCategory::Special),
                ("veteran", "Veteran", TagCategory::Achievement),
                ("builder", "Builder", TagCategory::Achievement),
                ("vip", "VIP", TagCategory::Custom),
                ("supporter", "Supporter", TagCategory::Custom),
            ];
            for (i, (name, display_name, category)) in tags.into_iter().enumerate() {
                state.tags.push(Tag {
                    id: i as i32 + 1,
                    name: name.to_string(),
                    display_name: display_name.to_string(),
                    description: None,
                    color: Tag::DEFAULT_COLOR.to_string(),
                    icon: None,
                    category,
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                });
            }

            let reactions = [
                ("👍", "like"),
                ("👎", "dislike"),
                ("❤️", "love"),
                ("😂", "laugh"),
                ("😮", "wow"),
                ("😢", "sad"),
                ("😡", "angry"),
            ];
            for (i, (emoji, name)) in reactions.into_iter().enumerate() {
                state.reaction_types.push(ReactionType {
                    id: i as i32 + 1,
                    emoji: emoji.to_string(),
                    name: name.to_string(),
                    description: None,
                    is_active: true,
                    created_at: now,
                });
            }
            // Retired type, hidden from the catalog
            state.reaction_types.push(ReactionType {
                id: 8,
                emoji: "🔥".to_string(),
                name: "fire".to_string(),
                description: None,
                is_active: false,
                created_at: now,
            });

            for name in [
                "General Discussion",
                "Announcements",
                "Help & Support",
                "Suggestions",
                "Builds",
                "Events",
            ] {
                let category = Category::new(name, None, None, None)
                    .expect("seed category is valid");
                state.categories.push(category);
            }
        }
        store
    }

    /// Service context whose repositories all point at this store
    pub(crate) fn context(&self) -> ServiceContext {
        let shared = Arc::new(self.clone());
        ServiceContext::new(
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared,
            Arc::new(JwtService::new("test-secret", 900)),
        )
    }

    pub(crate) fn add_user(&self, username: &str, role_id: Option<i32>) -> i64 {
        let mut state = self.state.lock();
        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                minecraft_username: None,
                avatar: None,
                role_id,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub(crate) fn role_id(&self, name: &str) -> i32 {
        let state = self.state.lock();
        state.roles.iter().find(|r| r.name == name).expect("role seeded").id
    }

    pub(crate) fn tag_id(&self, name: &str) -> i32 {
        let state = self.state.lock();
        state.tags.iter().find(|t| t.name == name).expect("tag seeded").id
    }

    pub(crate) fn reaction_type_id(&self, name: &str) -> i32 {
        let state = self.state.lock();
        state
            .reaction_types
            .iter()
            .find(|t| t.name == name)
            .expect("reaction type seeded")
            .id
    }

    pub(crate) fn category_id(&self, name: &str) -> Uuid {
        let state = self.state.lock();
        state
            .categories
            .iter()
            .find(|c| c.name == name)
            .expect("category seeded")
            .id
    }

    /// Topic plus one post by `author`, returning the post ID
    pub(crate) fn add_post(&self, author: i64) -> Uuid {
        let category = self.category_id("General Discussion");
        let topic = Topic::new(category, author, "Seeded topic", "Seeded topic body", &[])
            .expect("seed topic is valid");
        let post = Post::new(topic.id, author, "Seeded reply").expect("seed post is valid");
        let post_id = post.id;

        let mut state = self.state.lock();
        if let Some(c) = state.categories.iter_mut().find(|c| c.id == category) {
            c.topics_count += 1;
            c.posts_count += 1;
        }
        let mut topic = topic;
        topic.replies = 1;
        state.topics.push(topic);
        state.posts.push(post);
        post_id
    }

    pub(crate) fn post(&self, post_id: Uuid) -> Post {
        let state = self.state.lock();
        state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
            .expect("post exists")
    }

    pub(crate) fn active_role_assignments(&self, user_id: i64) -> usize {
        let state = self.state.lock();
        state
            .role_assignments
            .iter()
            .filter(|a| a.user_id == user_id && a.state == AssignmentState::Active)
            .count()
    }

    /// Write a tag assignment directly, bypassing expiry validation
    pub(crate) fn assign_tag_at(&self, user_id: i64, tag_id: i32, expires_at: Option<DateTime<Utc>>) {
        let mut state = self.state.lock();
        state
            .tag_assignments
            .retain(|a| !(a.user_id == user_id && a.tag_id == tag_id));
        state
            .tag_assignments
            .push(TagAssignment::new(user_id, tag_id, None, expires_at));
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state.lock();
        state.next_user_id += 1;
        let created = User {
            id: state.next_user_id,
            username: user.username.clone(),
            minecraft_username: user.minecraft_username.clone(),
            avatar: user.avatar.clone(),
            role_id: user.role_id,
            created_at: Utc::now(),
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_page(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Vec<User>> {
        Ok(paginate(self.state.lock().users_matching(filter), page))
    }

    async fn count(&self, filter: &UserFilter) -> RepoResult<i64> {
        Ok(self.state.lock().users_matching(filter).len() as i64)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Category>> {
        let state = self.state.lock();
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut categories = self.state.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, category: &Category) -> RepoResult<()> {
        self.state.lock().categories.push(category.clone());
        Ok(())
    }

    async fn latest_topics(&self) -> RepoResult<Vec<Topic>> {
        let state = self.state.lock();
        // Later insertion wins a created_at tie
        let mut latest: HashMap<Uuid, &Topic> = HashMap::new();
        for topic in &state.topics {
            let newer = latest
                .get(&topic.category_id)
                .map_or(true, |current| topic.created_at >= current.created_at);
            if newer {
                latest.insert(topic.category_id, topic);
            }
        }
        Ok(latest.into_values().cloned().collect())
    }
}

#[async_trait]
impl TopicRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Topic>> {
        let state = self.state.lock();
        Ok(state.topics.iter().find(|t| t.id == id).cloned())
    }

    async fn record_view(&self, id: Uuid) -> RepoResult<Option<Topic>> {
        let mut state = self.state.lock();
        Ok(state.topics.iter_mut().find(|t| t.id == id).map(|topic| {
            topic.views += 1;
            topic.clone()
        }))
    }

    async fn find_page(&self, filter: &TopicFilter, page: PageRequest) -> RepoResult<Vec<Topic>> {
        Ok(paginate(self.state.lock().topics_matching(filter), page))
    }

    async fn count(&self, filter: &TopicFilter) -> RepoResult<i64> {
        Ok(self.state.lock().topics_matching(filter).len() as i64)
    }

    async fn create(&self, topic: &Topic) -> RepoResult<()> {
        let mut state = self.state.lock();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == topic.category_id)
            .ok_or(DomainError::CategoryNotFound(topic.category_id))?;
        category.topics_count += 1;
        state.topics.push(topic.clone());
        Ok(())
    }

    async fn set_flags(
        &self,
        id: Uuid,
        locked: Option<bool>,
        pinned: Option<bool>,
    ) -> RepoResult<Topic> {
        let mut state = self.state.lock();
        let topic = state
            .topics
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DomainError::TopicNotFound(id))?;
        if let Some(locked) = locked {
            topic.is_locked = locked;
        }
        if let Some(pinned) = pinned {
            topic.is_pinned = pinned;
        }
        Ok(topic.clone())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let state = self.state.lock();
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_topic(&self, topic_id: Uuid, page: PageRequest) -> RepoResult<Vec<Post>> {
        let state = self.state.lock();
        let mut posts: Vec<Post> = state
            .posts
            .iter()
            .filter(|p| p.topic_id == topic_id)
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(paginate(posts, page))
    }

    async fn count_by_topic(&self, topic_id: Uuid) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.posts.iter().filter(|p| p.topic_id == topic_id).count() as i64)
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.lock();
        let topic = state
            .topics
            .iter_mut()
            .find(|t| t.id == post.topic_id)
            .ok_or(DomainError::TopicNotFound(post.topic_id))?;
        if !topic.accepts_posts() {
            return Err(DomainError::TopicLocked(topic.id));
        }
        topic.replies += 1;
        topic.updated_at = post.created_at;
        let category_id = topic.category_id;

        if let Some(category) = state.categories.iter_mut().find(|c| c.id == category_id) {
            category.posts_count += 1;
        }
        state.posts.push(post.clone());
        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn find_active_types(&self) -> RepoResult<Vec<ReactionType>> {
        let state = self.state.lock();
        let mut types: Vec<ReactionType> = state
            .reaction_types
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        types.sort_by_key(|t| t.id);
        Ok(types)
    }

    async fn find_type(&self, id: i32) -> RepoResult<Option<ReactionType>> {
        let state = self.state.lock();
        Ok(state.reaction_types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_vote(&self, post_id: Uuid, user_id: i64) -> RepoResult<Option<Vote>> {
        let state = self.state.lock();
        Ok(state
            .reactions
            .iter()
            .filter(|r| r.post_id == post_id && r.user_id == user_id)
            .find_map(|r| r.kind.vote()))
    }

    async fn toggle(&self, reaction: &Reaction) -> RepoResult<ToggleOutcome> {
        let mut state = self.state.lock();
        state.post_mut(reaction.post_id)?;

        match reaction.kind {
            ReactionKind::Vote(vote) => {
                let previous = state.toggle_slot(reaction)?;
                let slot = VoteSlot::apply(previous.and_then(ReactionKind::vote), vote);

                let post = state.post_mut(reaction.post_id)?;
                post.likes += slot.like_delta;
                post.dislikes += slot.dislike_delta;
                Ok(ToggleOutcome::Vote(VoteOutcome {
                    vote,
                    active: slot.is_active(vote),
                    likes: post.likes,
                    dislikes: post.dislikes,
                }))
            }
            ReactionKind::Named(type_id) => {
                let reaction_type = state
                    .reaction_types
                    .iter()
                    .find(|t| t.id == type_id && t.is_active)
                    .cloned()
                    .ok_or(DomainError::InvalidReactionType(type_id))?;
                let reacted = state.toggle_slot(reaction)?.is_none();

                let post = state.post_mut(reaction.post_id)?;
                post.reactions_count += if reacted { 1 } else { -1 };
                Ok(ToggleOutcome::Named(ReactionToggle {
                    reaction_type,
                    reacted,
                    reactions_count: post.reactions_count,
                }))
            }
        }
    }

    async fn summarize(
        &self,
        post_id: Uuid,
        viewer: Option<i64>,
    ) -> RepoResult<Vec<ReactionSummary>> {
        let state = self.state.lock();
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(DomainError::PostNotFound(post_id));
        }

        let mut summaries: Vec<ReactionSummary> = state
            .reaction_types
            .iter()
            .filter(|t| t.is_active)
            .map(|t| {
                let users: Vec<i64> = state
                    .named_reactions(post_id)
                    .filter(|(_, type_id)| *type_id == t.id)
                    .map(|(user, _)| user)
                    .collect();
                ReactionSummary {
                    reaction_type_id: t.id,
                    emoji: t.emoji.clone(),
                    name: t.name.clone(),
                    count: users.len() as i64,
                    user_reacted: viewer.is_some_and(|v| users.contains(&v)),
                }
            })
            .filter(ReactionSummary::is_visible)
            .collect();
        summaries.sort_by(ReactionSummary::display_order);
        Ok(summaries)
    }

    async fn count_reactions(&self, post_id: Uuid) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.named_reactions(post_id).count() as i64)
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Role>> {
        let mut roles = self.state.lock().roles.clone();
        roles.sort_by(|a, b| {
            b.hierarchy_level
                .cmp(&a.hierarchy_level)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(roles)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Role>> {
        let state = self.state.lock();
        Ok(state.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_default(&self) -> RepoResult<Option<Role>> {
        Ok(default_role(&self.state.lock().roles).cloned())
    }

    async fn assign(&self, user_id: i64, role_id: i32, assigned_by: Option<i64>) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.roles.iter().any(|r| r.id == role_id) {
            return Err(DomainError::RoleNotFound(role_id));
        }
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;
        user.role_id = Some(role_id);

        for assignment in state.role_assignments.iter_mut() {
            if assignment.user_id == user_id && assignment.role_id != role_id {
                assignment.state = AssignmentState::Revoked;
            }
        }
        state
            .role_assignments
            .retain(|a| !(a.user_id == user_id && a.role_id == role_id));
        state.role_assignments.push(RoleAssignment {
            user_id,
            role_id,
            assigned_by,
            assigned_at: Utc::now(),
            state: AssignmentState::Active,
        });
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_active(&self, category: Option<TagCategory>) -> RepoResult<Vec<Tag>> {
        let state = self.state.lock();
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|t| t.is_active && category.map_or(true, |c| t.category == c))
            .cloned()
            .collect();
        tags.sort_by(|a, b| {
            category_rank(a.category)
                .cmp(&category_rank(b.category))
                .then_with(|| a.display_name.cmp(&b.display_name))
        });
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Tag>> {
        let state = self.state.lock();
        Ok(state.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, tag: &NewTag) -> RepoResult<Tag> {
        let mut state = self.state.lock();
        if state.tags.iter().any(|t| t.name == tag.name) {
            return Err(DomainError::TagNameTaken(tag.name.clone()));
        }
        let now = Utc::now();
        let created = Tag {
            id: state.tags.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            name: tag.name.clone(),
            display_name: tag.display_name.clone(),
            description: tag.description.clone(),
            color: tag.color.clone(),
            icon: tag.icon.clone(),
            category: tag.category,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.tags.push(created.clone());
        Ok(created)
    }

    async fn assign(
        &self,
        user_id: i64,
        tag_id: i32,
        assigned_by: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> RepoResult<TagAssignment> {
        let mut state = self.state.lock();
        state.require_user(user_id)?;
        if !state.tags.iter().any(|t| t.id == tag_id) {
            return Err(DomainError::TagNotFound(tag_id));
        }

        if let Some(existing) = state
            .tag_assignments
            .iter_mut()
            .find(|a| a.user_id == user_id && a.tag_id == tag_id)
        {
            existing.reassign(assigned_by, expires_at);
            return Ok(existing.clone());
        }

        let assignment = TagAssignment::new(user_id, tag_id, assigned_by, expires_at);
        state.tag_assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn revoke(&self, user_id: i64, tag_id: i32) -> RepoResult<Option<TagAssignment>> {
        let mut state = self.state.lock();
        Ok(state
            .tag_assignments
            .iter_mut()
            .find(|a| a.user_id == user_id && a.tag_id == tag_id)
            .map(|assignment| {
                assignment.revoke();
                assignment.clone()
            }))
    }

    async fn effective_for_users(
        &self,
        user_ids: &[i64],
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<UserTag>> {
        let state = self.state.lock();
        let mut tags: Vec<UserTag> = state
            .tag_assignments
            .iter()
            .filter(|a| user_ids.contains(&a.user_id) && a.is_effective(now))
            .filter_map(|a| {
                state
                    .tags
                    .iter()
                    .find(|t| t.id == a.tag_id && t.is_active)
                    .map(|tag| UserTag {
                        user_id: a.user_id,
                        tag: tag.clone(),
                        assigned_at: a.assigned_at,
                        expires_at: a.expires_at,
                    })
            })
            .collect();
        tags.sort_by(|a, b| {
            a.user_id
                .cmp(&b.user_id)
                .then_with(|| category_rank(a.tag.category).cmp(&category_rank(b.tag.category)))
                .then_with(|| a.tag.display_name.cmp(&b.tag.display_name))
        });
        Ok(tags)
    }
}
