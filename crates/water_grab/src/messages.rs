pub const COLLECTED: &str = "+1 collected";
pub const UNSAFE_WATER: &str = "-1 (unsafe water)";
pub const HALFWAY: &str = "Halfway there!";

pub const WIN_MESSAGES: [&str; 4] = [
    "Clean water wins. You crushed it.",
    "You hit the goal. Real impact energy.",
    "That speed could fund a well.",
    "You moved like access matters (because it does).",
];

pub const LOSS_MESSAGES: [&str; 4] = [
    "Close. Try again and keep collecting.",
    "Almost there. Safe water is worth the hustle.",
    "You're getting faster. Run it back.",
    "Not quite the goal... but you're learning.",
];
