// Campus catalogue - static building and leaderboard datasets
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingStatus {
    Normal,
    High,
    Critical,
}

impl BuildingStatus {
    /// Normal below 85% of peak, high up to peak, critical at or over it
    pub fn from_load(current_load: f64, peak_load: f64) -> Self {
        if peak_load <= 0.0 || current_load >= peak_load {
            BuildingStatus::Critical
        } else if current_load >= peak_load * 0.85 {
            BuildingStatus::High
        } else {
            BuildingStatus::Normal
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingStats {
    pub id: String,
    pub name: String,
    pub current_load: f64,
    pub status: BuildingStatus,
    pub efficiency: u8,
    /// Percentage
    pub occupancy: u8,
    /// Celsius
    pub temperature: f64,
    pub last_updated: String,
    pub peak_load: f64,
}

impl BuildingStats {
    fn new(
        name: &str,
        current_load: f64,
        efficiency: u8,
        occupancy: u8,
        temperature: f64,
        last_updated: &str,
        peak_load: f64,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            current_load,
            status: BuildingStatus::from_load(current_load, peak_load),
            efficiency,
            occupancy,
            temperature,
            last_updated: last_updated.to_string(),
            peak_load,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub score: u32,
    pub change: i32,
}

pub fn buildings() -> Vec<BuildingStats> {
    vec![
        BuildingStats::new("Main Academic Block", 145.2, 92, 65, 22.4, "Just now", 180.0),
        BuildingStats::new("Tech Innovation Hub", 212.8, 78, 88, 24.1, "2 mins ago", 220.0),
        BuildingStats::new("Student Dorms (A)", 85.5, 88, 42, 21.8, "1 min ago", 110.0),
        BuildingStats::new("Campus Library", 55.4, 95, 30, 22.0, "Just now", 95.0),
        BuildingStats::new("Science Research Center", 310.2, 82, 70, 19.5, "4 mins ago", 350.0),
        BuildingStats::new("Administrative Wing", 42.1, 91, 15, 23.2, "10 mins ago", 60.0),
        BuildingStats::new("Sports Complex", 12.5, 98, 5, 25.5, "5 mins ago", 150.0),
        BuildingStats::new("Medical Center", 88.9, 89, 55, 21.0, "Just now", 120.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, building)| BuildingStats {
        id: (idx + 1).to_string(),
        ..building
    })
    .collect()
}

pub fn leaderboard() -> Vec<LeaderboardEntry> {
    [
        ("Main Academic Block", 980, 5),
        ("Campus Library", 945, 2),
        ("Science Labs", 890, -1),
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, (name, score, change))| LeaderboardEntry {
        rank: idx as u32 + 1,
        name: name.to_string(),
        score,
        change,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buildings_stay_under_peak() {
        let buildings = buildings();
        assert_eq!(buildings.len(), 8);
        assert!(buildings.iter().all(|b| b.current_load <= b.peak_load));
    }

    #[test]
    fn test_status_follows_load_against_peak() {
        assert_eq!(BuildingStatus::from_load(100.0, 200.0), BuildingStatus::Normal);
        assert_eq!(BuildingStatus::from_load(180.0, 200.0), BuildingStatus::High);
        assert_eq!(BuildingStatus::from_load(200.0, 200.0), BuildingStatus::Critical);
        assert_eq!(BuildingStatus::from_load(10.0, 0.0), BuildingStatus::Critical);

        let statuses: Vec<_> = buildings().iter().map(|b| b.status).collect();
        assert_eq!(statuses[0], BuildingStatus::Normal);
        assert_eq!(statuses[1], BuildingStatus::High);
        assert_eq!(statuses[4], BuildingStatus::High);
        assert_eq!(buildings()[7].id, "8");
    }

    #[test]
    fn test_leaderboard_is_ranked_by_score() {
        let board = leaderboard();
        assert_eq!(board[0].rank, 1);
        assert!(board.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(board[2].change, -1);
    }
}
