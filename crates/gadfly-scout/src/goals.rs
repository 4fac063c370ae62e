//! Research goals derived from scout memory

use gadfly_domain::{Priority, ScoutGoal, ScoutMemory};

/// Turn memory into goals: unresolved threads first, then interests
pub fn derive_scout_goals(memory: &ScoutMemory) -> Vec<ScoutGoal> {
    let threads = memory.unresolved_threads.iter().map(|id| ScoutGoal {
        focus: format!("Resolve investigation for node {}", id),
        priority: Priority::High,
    });
    let interests = memory.interests.iter().map(|interest| ScoutGoal {
        focus: format!("Monitor regulatory and research shifts in {}", interest),
        priority: Priority::Medium,
    });
    threads.chain(interests).collect()
}
