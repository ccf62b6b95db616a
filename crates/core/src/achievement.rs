use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AchievementError {
    #[error("tier table cannot be empty")]
    Empty,

    #[error("first tier must start at 0, found {0}")]
    NonZeroStart(u32),

    #[error("tier thresholds must strictly increase ({previous} then {next})")]
    NotIncreasing { previous: u32, next: u32 },
}

//
// ─── TIERS ─────────────────────────────────────────────────────────────────────
//

/// A milestone unlocked once the lifetime total reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementTier {
    pub threshold: u32,
    pub title: &'static str,
    pub icon: &'static str,
    pub message: &'static str,
    pub insight: &'static str,
    pub color_from: &'static str,
    pub color_to: &'static str,
}

const STANDARD_TIERS: [AchievementTier; 7] = [
    AchievementTier {
        threshold: 0,
        title: "Novice Starter",
        icon: "🌱",
        message: "Every journey begins with a single step.",
        insight: "The starting line. 100% intention set.",
        color_from: "from-emerald-400",
        color_to: "to-emerald-600",
    },
    AchievementTier {
        threshold: 15,
        title: "Momentum Builder",
        icon: "🔥",
        message: "You are heating up! Keep the streak alive.",
        insight: "Approx. 2 weeks consistent. Nervous system is adapting; you feel stronger.",
        color_from: "from-orange-400",
        color_to: "to-red-500",
    },
    AchievementTier {
        threshold: 40,
        title: "Routine Ranger",
        icon: "🧭",
        message: "Fitness is becoming your second nature.",
        insight: "Approx. 1 month. Posture improving, early metabolism boost.",
        color_from: "from-blue-400",
        color_to: "to-indigo-500",
    },
    AchievementTier {
        threshold: 80,
        title: "Iron Discipline",
        icon: "🛡️",
        message: "Your consistency is your strongest armor.",
        insight: "Approx. 2-3 months. Visible muscle definition starting to appear.",
        color_from: "from-indigo-500",
        color_to: "to-purple-600",
    },
    AchievementTier {
        threshold: 150,
        title: "Fitness Warrior",
        icon: "⚔️",
        message: "Crushing goals like a true warrior.",
        insight: "Approx. 4-5 months. Est. 0.5kg+ lean muscle gained. Clothes fit better.",
        color_from: "from-purple-500",
        color_to: "to-pink-600",
    },
    AchievementTier {
        threshold: 300,
        title: "Titan",
        icon: "⚡",
        message: "You have reached godlike performance.",
        insight: "Approx. 8-10 months. Significant strength gains above average.",
        color_from: "from-yellow-400",
        color_to: "to-amber-600",
    },
    AchievementTier {
        threshold: 500,
        title: "Legendary",
        icon: "👑",
        message: "Simply unmatched. A true legend.",
        insight: "1+ Year. Complete lifestyle transformation. Elite consistency.",
        color_from: "from-rose-500",
        color_to: "to-red-700",
    },
];

/// Ordered achievement tiers.
///
/// Invariants: non-empty, first threshold is 0, thresholds strictly increase.
/// These make tier lookup total and keep every tier span non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<AchievementTier>,
}

impl TierTable {
    /// Validate and build a tier table.
    ///
    /// # Errors
    ///
    /// Returns `AchievementError` if the table is empty, does not start at 0,
    /// or thresholds are not strictly increasing.
    pub fn new(tiers: Vec<AchievementTier>) -> Result<Self, AchievementError> {
        let first = tiers.first().ok_or(AchievementError::Empty)?;
        if first.threshold != 0 {
            return Err(AchievementError::NonZeroStart(first.threshold));
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(AchievementError::NotIncreasing {
                    previous: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }
        }
        Ok(Self { tiers })
    }

    #[must_use]
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS.to_vec(),
        }
    }

    #[must_use]
    pub fn tiers(&self) -> &[AchievementTier] {
        &self.tiers
    }

    /// Locate `total` within the tier table.
    #[must_use]
    pub fn evaluate(&self, total: u32) -> AchievementStatus<'_> {
        // First threshold is 0, so at least one tier is always <= total.
        let reached = self.tiers.partition_point(|t| t.threshold <= total);
        let current = &self.tiers[reached.saturating_sub(1)];
        let next = self.tiers.get(reached);

        let progress_to_next_percent = next.map_or(100.0, |next| {
            let span = f64::from(next.threshold - current.threshold);
            let gained = f64::from(total.saturating_sub(current.threshold));
            (gained / span * 100.0).clamp(0.0, 100.0)
        });

        AchievementStatus {
            total,
            current,
            next,
            progress_to_next_percent,
        }
    }

    /// Every tier with whether `total` has unlocked it.
    #[must_use]
    pub fn roadmap(&self, total: u32) -> Vec<RoadmapEntry<'_>> {
        self.tiers
            .iter()
            .map(|tier| RoadmapEntry {
                tier,
                unlocked: total >= tier.threshold,
            })
            .collect()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Where a lifetime total sits in the tier table.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementStatus<'a> {
    pub total: u32,
    pub current: &'a AchievementTier,
    pub next: Option<&'a AchievementTier>,
    /// Progress from `current` toward `next`, in `[0, 100]`; 100 at the last tier.
    pub progress_to_next_percent: f64,
}

impl AchievementStatus<'_> {
    /// Completions still needed for the next tier, `None` at the last tier.
    #[must_use]
    pub fn remaining_to_next(&self) -> Option<u32> {
        self.next.map(|next| next.threshold - self.total)
    }

    #[must_use]
    pub fn is_max_tier(&self) -> bool {
        self.next.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapEntry<'a> {
    pub tier: &'a AchievementTier,
    pub unlocked: bool,
}
