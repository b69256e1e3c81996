use tracing::debug;

use crate::activity::{Activity, ActivityType};

/// Coarse ranking order: whole kilometers first, then whole seconds of pace.
///
/// Activities in the same kilometer and pace second are equal for ranking.
pub fn ranks_before(a: &Activity, b: &Activity) -> bool {
    let da = (a.total_distance_meters / 1000.0) as i64;
    let db = (b.total_distance_meters / 1000.0) as i64;
    let pa = a.pace_seconds_per_km as i64;
    let pb = b.pace_seconds_per_km as i64;

    da < db || (da == db && pa < pb)
}

/// Activities kept in ranking order as they arrive.
#[derive(Debug, Default, Clone)]
pub struct ActivityCollection {
    activities: Vec<Activity>,
}

impl ActivityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after every activity that does not rank after the new one,
    /// so ties stay in arrival order.
    pub fn insert(&mut self, activity: Activity) {
        let index = self
            .activities
            .partition_point(|existing| !ranks_before(&activity, existing));
        self.activities.insert(index, activity);
    }

    pub fn as_slice(&self) -> &[Activity] {
        &self.activities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActivityCollection {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The walking and running rankings. Other activity types are not ranked.
#[derive(Debug, Default, Clone)]
pub struct Rankings {
    pub walking: ActivityCollection,
    pub running: ActivityCollection,
}

impl Rankings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the activity under its type. Returns `false` when the type is not
    /// ranked and the activity was dropped.
    pub fn insert(&mut self, activity: Activity) -> bool {
        let collection = match activity.activity_type {
            ActivityType::Walking => &mut self.walking,
            ActivityType::Running => &mut self.running,
            ActivityType::Other(ref kind) => {
                debug!(kind = %kind, start = %activity.start_time, "ignoring unranked activity type");
                return false;
            }
        };
        collection.insert(activity);
        true
    }

    pub fn len(&self) -> usize {
        self.walking.len() + self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walking.is_empty() && self.running.is_empty()
    }
}
