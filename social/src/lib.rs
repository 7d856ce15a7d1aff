//! Community feed, stories and memberships.

use {
    bevy::prelude::*,
    chrono::{DateTime, Utc},
    hitch_events::TokensEarned,
    progression_components::TokenSource,
    settings::ClientSettings,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub likes: u32,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: String,
    pub name: String,
    pub member_count: u32,
    pub is_member: bool,
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SocialFeed {
    /// Newest first.
    pub feed: Vec<Post>,
    /// Newest first.
    pub my_stories: Vec<Story>,
    pub communities: Vec<Community>,
    pub following: Vec<String>,
    pub followers: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Message, Debug, Clone)]
pub enum SocialAction {
    SetFeed(Vec<Post>),
    AddToFeed(Post),
    SetMyStories(Vec<Story>),
    /// Shares a story; pays the social share reward.
    AddStory(Story),
    SetCommunities(Vec<Community>),
    JoinCommunity(String),
    LeaveCommunity(String),
    /// Toggles the like on a feed post.
    LikePost(String),
    SetLoading(bool),
    SetError(String),
    ClearError,
}

impl SocialFeed {
    pub fn apply(&mut self, action: SocialAction) {
        match action {
            SocialAction::SetFeed(feed) => self.feed = feed,
            SocialAction::AddToFeed(post) => self.feed.insert(0, post),
            SocialAction::SetMyStories(stories) => self.my_stories = stories,
            SocialAction::AddStory(story) => self.my_stories.insert(0, story),
            SocialAction::SetCommunities(communities) => self.communities = communities,
            SocialAction::JoinCommunity(id) => {
                if let Some(community) = self.community_mut(&id).filter(|c| !c.is_member) {
                    community.is_member = true;
                    community.member_count = community.member_count.saturating_add(1);
                }
            }
            SocialAction::LeaveCommunity(id) => {
                if let Some(community) = self.community_mut(&id).filter(|c| c.is_member) {
                    community.is_member = false;
                    community.member_count = community.member_count.saturating_sub(1);
                }
            }
            SocialAction::LikePost(id) => {
                if let Some(post) = self.feed.iter_mut().find(|p| p.id == id) {
                    post.is_liked = !post.is_liked;
                    post.likes = if post.is_liked {
                        post.likes.saturating_add(1)
                    } else {
                        post.likes.saturating_sub(1)
                    };
                }
            }
            SocialAction::SetLoading(loading) => self.loading = loading,
            SocialAction::SetError(error) => self.error = Some(error),
            SocialAction::ClearError => self.error = None,
        }
    }

    pub fn joined_communities(&self) -> impl Iterator<Item = &Community> {
        self.communities.iter().filter(|c| c.is_member)
    }

    fn community_mut(&mut self, id: &str) -> Option<&mut Community> {
        self.communities.iter_mut().find(|c| c.id == id)
    }
}

pub struct SocialPlugin;

impl Plugin for SocialPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SocialFeed>()
            .init_resource::<ClientSettings>()
            .add_message::<SocialAction>()
            .add_systems(Update, apply_social_actions);
    }
}

pub fn apply_social_actions(
    mut actions: MessageReader<SocialAction>,
    mut feed: ResMut<SocialFeed>,
    settings: Res<ClientSettings>,
    mut commands: Commands,
) {
    for action in actions.read() {
        if let SocialAction::AddStory(story) = action {
            info!(story_id = %story.id, "story shared");
            commands.trigger(TokensEarned {
                amount: settings.token_rewards.social_share,
                source: TokenSource::Social,
                reference: Some(story.id.clone()),
            });
        }
        feed.apply(action.clone());
    }
}
