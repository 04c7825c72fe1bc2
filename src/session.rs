use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::rest_timer::TimerKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulder,
    Biceps,
    Triceps,
    Abs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutType {
    Chest,
    Back,
    Legs,
    Shoulder,
    Arms,
    Push,
    Pull,
    Upper,
    Lower,
    ShoulderTriceps,
    BackBiceps,
}

impl WorkoutType {
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutType::Chest => "Chest",
            WorkoutType::Back => "Back",
            WorkoutType::Legs => "Legs",
            WorkoutType::Shoulder => "Shoulders",
            WorkoutType::Arms => "Arms",
            WorkoutType::Push => "Push",
            WorkoutType::Pull => "Pull",
            WorkoutType::Upper => "Upper Body",
            WorkoutType::Lower => "Lower Body",
            WorkoutType::ShoulderTriceps => "Shoulders/Triceps",
            WorkoutType::BackBiceps => "Back/Biceps",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    Home,
    Gym,
}

impl Location {
    pub fn display_name(&self) -> &'static str {
        match self {
            Location::Home => "Home",
            Location::Gym => "Gym",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub body_weight: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetDetail {
    pub reps: u32,
    pub weight: f64,
    pub result_reps: u32,
    pub result_weight: f64,
}

impl SetDetail {
    pub fn planned(reps: u32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            result_reps: 0,
            result_weight: 0.0,
        }
    }

    pub fn logged(&self) -> bool {
        self.result_reps > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub exercise: Exercise,
    pub sets: Vec<SetDetail>,
}

impl ExerciseEntry {
    pub fn sets_logged(&self) -> usize {
        self.sets.iter().filter(|set| set.logged()).count()
    }

    pub fn done(&self) -> bool {
        self.sets.iter().all(SetDetail::logged)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub workout_type: WorkoutType,
    pub location: Location,
    pub exercises: Vec<ExerciseEntry>,
    pub completed: bool,
    pub completed_at: Option<String>,
}

impl Default for WorkoutSession {
    fn default() -> Self {
        let exercises = vec![
            ExerciseEntry {
                exercise: Exercise {
                    name: "Bench Press".to_string(),
                    muscle_group: MuscleGroup::Chest,
                    body_weight: false,
                },
                sets: planned_sets(4, 8, 60.0),
            },
            ExerciseEntry {
                exercise: Exercise {
                    name: "Overhead Press".to_string(),
                    muscle_group: MuscleGroup::Shoulder,
                    body_weight: false,
                },
                sets: planned_sets(3, 10, 40.0),
            },
            ExerciseEntry {
                exercise: Exercise {
                    name: "Incline Dumbbell Press".to_string(),
                    muscle_group: MuscleGroup::Chest,
                    body_weight: false,
                },
                sets: planned_sets(3, 10, 22.5),
            },
            ExerciseEntry {
                exercise: Exercise {
                    name: "Triceps Dip".to_string(),
                    muscle_group: MuscleGroup::Triceps,
                    body_weight: true,
                },
                sets: planned_sets(3, 12, 0.0),
            },
        ];

        Self {
            workout_type: WorkoutType::Push,
            location: Location::Gym,
            exercises,
            completed: false,
            completed_at: None,
        }
    }
}

impl WorkoutSession {
    pub fn timer_key(&self, position: usize) -> Option<TimerKey> {
        let entry = position.checked_sub(1).and_then(|i| self.exercises.get(i))?;
        Some(timer_key(&entry.exercise, position))
    }

    // Marks the first open set of the exercise as done with its planned
    // numbers, returns the set index.
    pub fn log_next_set(&mut self, position: usize) -> Option<usize> {
        let entry = position
            .checked_sub(1)
            .and_then(|i| self.exercises.get_mut(i))?;
        let (index, set) = entry
            .sets
            .iter_mut()
            .enumerate()
            .find(|(_, set)| !set.logged())?;
        set.result_reps = set.reps;
        set.result_weight = set.weight;
        Some(index)
    }

    // Replacements target the same muscle group, so only the name changes
    // while logged results start over.
    pub fn swap_exercise(&mut self, position: usize, name: String) -> bool {
        let entry = match position
            .checked_sub(1)
            .and_then(|i| self.exercises.get_mut(i))
        {
            Some(entry) => entry,
            None => return false,
        };
        entry.exercise.name = name;
        for set in &mut entry.sets {
            set.result_reps = 0;
            set.result_weight = 0.0;
        }
        true
    }

    pub fn complete(&mut self) {
        self.completed = true;
        self.completed_at = Some(Utc::now().to_rfc3339());
    }

    pub fn exercises_done(&self) -> usize {
        self.exercises.iter().filter(|entry| entry.done()).count()
    }

    pub fn current_position(&self) -> Option<usize> {
        self.exercises
            .iter()
            .position(|entry| !entry.done())
            .map(|i| i + 1)
    }
}

pub fn timer_key(exercise: &Exercise, position: usize) -> TimerKey {
    format!("{}-{}", slug(&exercise.name), position)
}

fn slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn planned_sets(count: usize, reps: u32, weight: f64) -> Vec<SetDetail> {
    (0..count).map(|_| SetDetail::planned(reps, weight)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_are_logged_in_order() {
        let mut session = WorkoutSession::default();
        assert_eq!(session.log_next_set(1), Some(0));
        assert_eq!(session.log_next_set(1), Some(1));
        assert_eq!(session.exercises[0].sets_logged(), 2);

        let first = &session.exercises[0].sets[0];
        assert_eq!(first.result_reps, first.reps);
    }

    #[test]
    fn logging_past_the_last_set_returns_none() {
        let mut session = WorkoutSession::default();
        let total = session.exercises[0].sets.len();
        for _ in 0..total {
            assert!(session.log_next_set(1).is_some());
        }
        assert_eq!(session.log_next_set(1), None);
        assert!(session.exercises[0].done());
    }

    #[test]
    fn positions_outside_the_routine_are_rejected() {
        let mut session = WorkoutSession::default();
        assert_eq!(session.log_next_set(0), None);
        assert_eq!(session.log_next_set(7), None);
        assert_eq!(session.timer_key(0), None);
        assert_eq!(session.timer_key(7), None);
    }

    #[test]
    fn timer_keys_come_from_name_and_position() {
        let exercise = Exercise {
            name: "Bench Press".to_string(),
            muscle_group: MuscleGroup::Chest,
            body_weight: false,
        };
        assert_eq!(timer_key(&exercise, 1), "bench-press-1");
    }

    #[test]
    fn swapping_keeps_the_plan_but_clears_results() {
        let mut session = WorkoutSession::default();
        session.log_next_set(2);
        let planned = session.exercises[1].sets.len();

        assert!(session.swap_exercise(2, "Arnold Press".to_string()));

        let entry = &session.exercises[1];
        assert_eq!(entry.exercise.name, "Arnold Press");
        assert_eq!(entry.sets.len(), planned);
        assert_eq!(entry.sets_logged(), 0);
    }

    #[test]
    fn completion_is_stamped() {
        let mut session = WorkoutSession::default();
        session.complete();
        assert!(session.completed);
        assert!(session.completed_at.is_some());
    }

    #[test]
    fn done_count_tracks_fully_logged_exercises() {
        let mut session = WorkoutSession::default();
        assert_eq!(session.exercises_done(), 0);
        assert_eq!(session.current_position(), Some(1));

        let total = session.exercises[0].sets.len();
        for _ in 0..total {
            session.log_next_set(1);
        }

        assert_eq!(session.exercises_done(), 1);
        assert_eq!(session.current_position(), Some(2));
    }
}
