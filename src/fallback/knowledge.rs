//! Canned fitness answers used when no remote model is available.

/// Maps a lowercase substring trigger to a canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub trigger: &'static str,
    pub text: &'static str,
}

// Scanned top to bottom; the first trigger found in the message wins.
pub(crate) const KNOWLEDGE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        trigger: "hello",
        text: "Hi there! I'm your fitness assistant. Ask me about workouts, nutrition, or fitness tips!",
    },
    KnowledgeEntry {
        trigger: "hi",
        text: "Hello! Welcome to FitPro. How can I help you today?",
    },
    KnowledgeEntry {
        trigger: "how are you",
        text: "I'm doing great! Ready to help you achieve your fitness goals!",
    },
    KnowledgeEntry {
        trigger: "help",
        text: "I can help you with:\n• Workout advice\n• Nutrition tips\n• Motivation\n• Fitness goals\n• Exercise techniques\nJust ask away!",
    },
    KnowledgeEntry {
        trigger: "steps",
        text: "Great question! A healthy daily step goal is typically 10,000 steps, but any activity is beneficial. Start where you are and gradually increase!",
    },
    KnowledgeEntry {
        trigger: "calories",
        text: "Daily calorie needs vary by person. As a rough estimate: sedentary = 1,800-2,000, active = 2,200-2,800. Combine with exercise for best results!",
    },
    KnowledgeEntry {
        trigger: "workout",
        text: "Popular workouts include: walking, running, cycling, HIIT, strength training, yoga, and sports. Pick what you enjoy!",
    },
    KnowledgeEntry {
        trigger: "motivation",
        text: "Remember: every step counts! Consistency beats perfection. Celebrate small wins and keep moving forward!",
    },
    KnowledgeEntry {
        trigger: "tired",
        text: "Rest is important for recovery! Make sure you're getting 7-9 hours of sleep and staying hydrated.",
    },
];

pub(crate) const GENERIC_REPLIES: &[&str] = &[
    "That's a great question! In general, consistency and listening to your body are key to fitness success.",
    "Great question about fitness! Make sure to stay hydrated, warm up before exercise, and rest between workouts.",
    "Interesting! Remember that everyone's fitness journey is unique. Focus on progress, not perfection!",
    "Good thinking! The best workout is the one you'll actually do. Find what you enjoy!",
    "Nice question! Building a routine that fits your lifestyle is more important than perfection.",
    "That's important! Remember that rest and recovery are just as crucial as the workout itself.",
    "Absolutely! Nutrition plays a huge role in achieving your fitness goals.",
    "Smart thinking! Tracking your progress helps you stay motivated and see improvements over time.",
    "Great mindset! Starting small and building up gradually is the best approach to long-term success.",
    "Exactly! Combining cardio, strength training, and flexibility work gives you a well-rounded fitness routine.",
];
