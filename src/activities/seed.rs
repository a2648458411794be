//! Activities every fresh process starts with

use super::model::Activity;

/// (name, description, schedule, `max_participants`, participants)
type SeedRow = (&'static str, &'static str, &'static str, u32, [&'static str; 2]);

const SEED: &[SeedRow] = &[
    (
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        ["michael@mergington.edu", "daniel@mergington.edu"],
    ),
    (
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
        ["emma@mergington.edu", "sophia@mergington.edu"],
    ),
    (
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
        ["john@mergington.edu", "olivia@mergington.edu"],
    ),
    (
        "Soccer Team",
        "Join the school soccer team and compete in matches",
        "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        22,
        ["liam@mergington.edu", "noah@mergington.edu"],
    ),
    (
        "Basketball Team",
        "Practice and play basketball with the school team",
        "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        15,
        ["ava@mergington.edu", "mia@mergington.edu"],
    ),
    (
        "Art Club",
        "Explore your creativity through painting and drawing",
        "Thursdays, 3:30 PM - 5:00 PM",
        15,
        ["isabella@mergington.edu", "amelia@mergington.edu"],
    ),
    (
        "Drama Club",
        "Participate in plays and improve your acting skills",
        "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        20,
        ["charlotte@mergington.edu", "harper@mergington.edu"],
    ),
    (
        "Math Club",
        "Solve challenging math problems and prepare for competitions",
        "Tuesdays, 3:30 PM - 4:30 PM",
        10,
        ["elijah@mergington.edu", "james@mergington.edu"],
    ),
    (
        "Science Club",
        "Conduct experiments and explore scientific concepts",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        ["benjamin@mergington.edu", "lucas@mergington.edu"],
    ),
    (
        "Tennis Club",
        "Learn and practice tennis with fellow students",
        "Tuesdays and Thursdays, 3:30 PM - 5:00 PM",
        10,
        ["grace@mergington.edu", "henry@mergington.edu"],
    ),
    (
        "Swimming Team",
        "Join the swimming team and compete in swim meets",
        "Mondays, Wednesdays, Fridays, 4:00 PM - 5:30 PM",
        15,
        ["ella@mergington.edu", "jackson@mergington.edu"],
    ),
    (
        "Photography Club",
        "Learn photography techniques and capture amazing moments",
        "Wednesdays, 3:30 PM - 5:00 PM",
        12,
        ["scarlett@mergington.edu", "logan@mergington.edu"],
    ),
    (
        "Music Band",
        "Play instruments and perform in the school band",
        "Fridays, 3:30 PM - 5:00 PM",
        20,
        ["zoe@mergington.edu", "nathan@mergington.edu"],
    ),
    (
        "Debate Club",
        "Engage in debates and improve public speaking skills",
        "Thursdays, 3:30 PM - 5:00 PM",
        15,
        ["hannah@mergington.edu", "samuel@mergington.edu"],
    ),
    (
        "Robotics Club",
        "Build robots and participate in robotics competitions",
        "Mondays and Wednesdays, 3:30 PM - 5:00 PM",
        10,
        ["leo@mergington.edu", "chloe@mergington.edu"],
    ),
];

/// Build the seed activities in their canonical order
pub fn seed_activities() -> Vec<Activity> {
    SEED.iter()
        .map(
            |&(name, description, schedule, max_participants, participants)| Activity {
                name: name.to_string(),
                description: description.to_string(),
                schedule: schedule.to_string(),
                max_participants,
                participants: participants.iter().map(ToString::to_string).collect(),
            },
        )
        .collect()
}
