//! Presence rotation driven by cache statistics.

use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_gateway::MessageSender;
use twilight_model::gateway::{
    payload::outgoing::UpdatePresence,
    presence::{Activity, ActivityType, MinimalActivity, Status},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Watching,
    Listening,
    Playing,
}

impl From<ActivityKind> for ActivityType {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Watching => ActivityType::Watching,
            ActivityKind::Listening => ActivityType::Listening,
            ActivityKind::Playing => ActivityType::Playing,
        }
    }
}

/// One presence in the rotation.
///
/// `template` may contain `{guilds}` and `{users}`, filled from the cache.
#[derive(Clone, Copy, Debug)]
pub struct StatusEntry {
    pub kind: ActivityKind,
    pub template: &'static str,
}

impl StatusEntry {
    pub const fn watching(template: &'static str) -> Self {
        Self {
            kind: ActivityKind::Watching,
            template,
        }
    }

    pub fn render(&self, counts: Counts) -> String {
        self.template
            .replace("{guilds}", &counts.guilds.to_string())
            .replace("{users}", &counts.users.to_string())
    }
}

pub const DEFAULT_ROTATION: &[StatusEntry] = &[
    StatusEntry::watching("over {guilds} servers"),
    StatusEntry::watching("over {users} users"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub guilds: usize,
    pub users: usize,
}

/// Cycles through `entries`, wrapping around at the end.
pub struct Rotation {
    entries: &'static [StatusEntry],
    next: usize,
}

impl Rotation {
    pub fn new(entries: &'static [StatusEntry]) -> Self {
        Self { entries, next: 0 }
    }

    pub fn advance(&mut self) -> Option<StatusEntry> {
        let entry = *self.entries.get(self.next)?;
        self.next = (self.next + 1) % self.entries.len();
        Some(entry)
    }
}

fn presence(entry: StatusEntry, counts: Counts) -> anyhow::Result<UpdatePresence> {
    let activity = Activity::from(MinimalActivity {
        kind: entry.kind.into(),
        name: entry.render(counts),
        url: None,
    });

    Ok(UpdatePresence::new(vec![activity], false, None::<u64>, Status::Online)?)
}

pub struct StatusRotator {
    sender: MessageSender,
    cache: Arc<DefaultInMemoryCache>,
    rotation: Rotation,
    every: Duration,
}

impl StatusRotator {
    pub fn new(
        sender: MessageSender,
        cache: Arc<DefaultInMemoryCache>,
        entries: &'static [StatusEntry],
        every: Duration,
    ) -> Self {
        Self {
            sender,
            cache,
            rotation: Rotation::new(entries),
            every,
        }
    }

    fn counts(&self) -> Counts {
        let stats = self.cache.stats();
        Counts {
            guilds: stats.guilds(),
            users: stats.users(),
        }
    }

    fn rotate(&mut self) -> anyhow::Result<()> {
        let Some(entry) = self.rotation.advance() else {
            return Ok(());
        };

        let counts = self.counts();
        self.sender.command(&presence(entry, counts)?)?;
        debug!(kind = ?entry.kind, text = entry.render(counts), "presence updated");

        Ok(())
    }

    /// Run until the task is aborted. The first update is sent immediately.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.every);
        loop {
            interval.tick().await;
            if let Err(source) = self.rotate() {
                warn!(?source, "status rotation failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_filled_from_counts() {
        let counts = Counts {
            guilds: 12,
            users: 3400,
        };
        assert_eq!(DEFAULT_ROTATION[0].render(counts), "over 12 servers");
        assert_eq!(DEFAULT_ROTATION[1].render(counts), "over 3400 users");
    }

    #[test]
    fn rotation_wraps_around() {
        let mut rotation = Rotation::new(DEFAULT_ROTATION);
        let templates: Vec<_> = (0..5)
            .map(|_| rotation.advance().unwrap().template)
            .collect();
        assert_eq!(
            templates,
            [
                "over {guilds} servers",
                "over {users} users",
                "over {guilds} servers",
                "over {users} users",
                "over {guilds} servers",
            ]
        );
    }

    #[test]
    fn empty_rotation_yields_nothing() {
        assert!(Rotation::new(&[]).advance().is_none());
    }

    #[test]
    fn presence_carries_activity_kind() {
        let entry = StatusEntry {
            kind: ActivityKind::Listening,
            template: "{users} users",
        };
        let update = presence(entry, Counts { guilds: 1, users: 2 }).unwrap();

        let activity = &update.d.activities[0];
        assert_eq!(activity.kind, ActivityType::Listening);
        assert_eq!(activity.name, "2 users");
        assert_eq!(update.d.status, Status::Online);
    }
}
