use serde::{Deserialize, Serialize};

use crate::domain::Category;

/// Ranking points floor a division imposes on a line-up.
///
/// At least `min_players` of the fielded players must have `min_points` or
/// more. Divisions without an entry have no floor.
#[derive(Debug, Clone)]
pub struct RankingFloor {
    pub category: Category,
    pub division: &'static str,
    pub min_points: u32,
    pub min_players: usize,
}

impl RankingFloor {
    pub fn new(category: Category, division: &'static str, min_points: u32, min_players: usize) -> Self {
        Self {
            category,
            division,
            min_points,
            min_players,
        }
    }

    pub fn applies_to(&self, category: Category, division: &str) -> bool {
        self.category == category && self.division == division.trim()
    }
}

/// Get the ranking floors of the classic league divisions
pub fn get_ranking_floors() -> Vec<RankingFloor> {
    vec![
        RankingFloor::new(Category::Men, "Division 1", 1800, 2),
        RankingFloor::new(Category::Men, "Division 2", 1600, 2),
        RankingFloor::new(Category::Men, "Division 3", 1400, 2),
        RankingFloor::new(Category::Women, "Division 1", 1100, 2),
        RankingFloor::new(Category::Women, "Division 2", 900, 2),
    ]
}

/// Group layout of a group-league division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStructure {
    pub groups: u32,
    pub players_per_group: u32,
    pub total: u32,
}

impl GroupStructure {
    pub const fn new(groups: u32, players_per_group: u32) -> Self {
        Self {
            groups,
            players_per_group,
            total: groups * players_per_group,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DivisionStructure {
    pub label: &'static str,
    pub structure: GroupStructure,
}

impl DivisionStructure {
    pub fn new(label: &'static str, groups: u32, players_per_group: u32) -> Self {
        Self {
            label,
            structure: GroupStructure::new(groups, players_per_group),
        }
    }
}

/// Get the group-league divisions and their group layout
pub fn get_group_structures() -> Vec<DivisionStructure> {
    vec![
        DivisionStructure::new("Excellence", 3, 3),
        DivisionStructure::new("Promo Excellence", 3, 3),
        DivisionStructure::new("Honneur", 3, 3),
        DivisionStructure::new("1st Division", 2, 3),
        DivisionStructure::new("2nd Division", 1, 3),
    ]
}
