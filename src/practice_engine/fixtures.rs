//! Sample course content shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::practice_engine::models::Course;

/// A fixed instant, well away from any UTC day boundary.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
}

pub fn course_en() -> Course {
    serde_json::from_value(json!({
        "id": "course_1_en",
        "title": "Introduction to Hermeticism",
        "description": "Master the fundamental principles of reality and self-responsibility.",
        "units": [{
            "id": "unit_1",
            "title": "Mentalism & Correspondence",
            "description": "Understanding that the All is Mind and As Above, So Below.",
            "order": 1,
            "lessons": [
                {
                    "id": "lesson_1_1",
                    "title": "The Principle of Mentalism",
                    "description": "The Universe is Mental.",
                    "requiredScorePercent": 75,
                    "introText": "Before we can change anything in our lives, we must understand the nature of the container we live in.",
                    "quote": { "text": "The All is Mind; The Universe is Mental.", "source": "The Kybalion" },
                    "interpretation": "This does not mean the universe is 'imaginary' in a trivial sense. It means that the underlying substance of reality is consciousness. Just as you create a dream world with your mind, the Great Mind creates the universe. Your thoughts are seeds.",
                    "exercises": [
                        {
                            "id": "ex_1",
                            "type": "TRUE_FALSE",
                            "prompt": "Does 'The Universe is Mental' mean that physical objects do not exist?",
                            "options": ["True", "False"],
                            "correctAnswer": false,
                            "explanation": "Physical objects exist, but their essence and origin are mental in nature.",
                            "points": 10
                        },
                        {
                            "id": "ex_2",
                            "type": "MULTIPLE_CHOICE",
                            "prompt": "If the Universe is Mental, what is the most powerful tool you possess?",
                            "options": ["Physical Strength", "Financial Wealth", "Thought/Focus", "Social Status"],
                            "correctAnswer": "Thought/Focus",
                            "explanation": "Since reality is mental, your ability to direct your thought is your primary tool.",
                            "points": 10
                        },
                        {
                            "id": "ex_3",
                            "type": "SCENARIO",
                            "prompt": "You are stuck in traffic and feel angry. Applying the Principle of Mentalism, what is the first responsible step?",
                            "options": [
                                "Honk the horn to release energy.",
                                "Accept that traffic is external and you are a victim.",
                                "Observe your own mental state as the creator of the 'anger' experience.",
                                "Call a friend to complain."
                            ],
                            "correctAnswer": "Observe your own mental state as the creator of the 'anger' experience.",
                            "explanation": "Responsibility starts inside.",
                            "points": 15
                        },
                        {
                            "id": "ex_4",
                            "type": "REFLECTION",
                            "prompt": "Describe a recent situation where your mindset determined the outcome more than the external events.",
                            "explanation": "Reflecting on personal experience anchors the theory.",
                            "points": 20
                        }
                    ]
                },
                {
                    "id": "lesson_1_2",
                    "title": "The Principle of Correspondence",
                    "description": "As above, so below.",
                    "requiredScorePercent": 80,
                    "introText": "Patterns repeat on all scales. To understand the huge, look at the small. To understand the small, look at the huge.",
                    "quote": { "text": "As above, so below; as below, so above.", "source": "The Kybalion" },
                    "interpretation": "This is the law of analogy. Your inner world (microcosm) reflects the outer world (macrocosm) and vice versa. If your room is messy, your mind is likely cluttered. If your mind is chaotic, your life events will feel chaotic.",
                    "exercises": [
                        {
                            "id": "ex_2_1",
                            "type": "SORTING",
                            "prompt": "Arrange the sequence of manifestation according to Correspondence (Inner to Outer).",
                            "options": ["Action", "Thought", "Result/Circumstance", "Emotion"],
                            "correctAnswer": ["Thought", "Emotion", "Action", "Result/Circumstance"],
                            "explanation": "It flows from the subtle (Thought) to the gross (Result).",
                            "points": 15
                        },
                        {
                            "id": "ex_2_2",
                            "type": "CLOZE",
                            "prompt": "To change your outer circumstances, you must first change your _____.",
                            "options": ["job", "partner", "inner state", "location"],
                            "correctAnswer": "inner state",
                            "explanation": "The outer is a reflection of the inner.",
                            "points": 10
                        }
                    ]
                },
                {
                    "id": "lesson_1_3",
                    "title": "Unit Review & Mastery",
                    "description": "Integrate Mentalism and Correspondence.",
                    "requiredScorePercent": 90,
                    "introText": "Let us weave these two threads together.",
                    "exercises": [
                        {
                            "id": "ex_3_1",
                            "type": "SCENARIO",
                            "prompt": "You want a promotion (Outer). Using Correspondence and Mentalism, what is the correct approach?",
                            "options": [
                                "Demand it because you worked hard.",
                                "Wait and hope someone notices.",
                                "Align your mental attitude and work ethic (Inner) with the qualities of the role you want."
                            ],
                            "correctAnswer": "Align your mental attitude and work ethic (Inner) with the qualities of the role you want.",
                            "explanation": "Become the vibration of the thing you desire.",
                            "points": 20
                        }
                    ]
                }
            ]
        }]
    }))
    .expect("fixture course is valid")
}

pub fn course_de() -> Course {
    serde_json::from_value(json!({
        "id": "course_1_de",
        "title": "Einführung in die Hermetik",
        "units": [{
            "id": "unit_1",
            "title": "Mentalismus & Entsprechung",
            "order": 1,
            "lessons": [
                {
                    "id": "lesson_1_1",
                    "title": "Das Prinzip des Geistes",
                    "description": "Das Universum ist geistig.",
                    "introText": "Bevor wir irgendetwas in unserem Leben ändern können, müssen wir die Natur des Behälters verstehen, in dem wir leben.",
                    "quote": { "text": "Das All ist Geist; das Universum ist geistig.", "source": "Das Kybalion" },
                    "interpretation": "Das bedeutet nicht, dass das Universum 'imaginär' in einem trivialen Sinne ist. Es bedeutet, dass die zugrunde liegende Substanz der Realität Bewusstsein ist. Deine Gedanken sind Samen.",
                    "exercises": [
                        {
                            "id": "ex_1",
                            "type": "TRUE_FALSE",
                            "prompt": "Bedeutet 'Das Universum ist geistig', dass physische Objekte nicht existieren?",
                            "options": ["Wahr", "Falsch"],
                            "correctAnswer": false,
                            "points": 10
                        },
                        {
                            "id": "ex_2",
                            "type": "MULTIPLE_CHOICE",
                            "prompt": "Wenn das Universum geistig ist, was ist das mächtigste Werkzeug, das du besitzt?",
                            "options": ["Körperliche Stärke", "Finanzieller Reichtum", "Gedanken/Fokus", "Sozialer Status"],
                            "correctAnswer": "Gedanken/Fokus",
                            "points": 10
                        }
                    ]
                },
                {
                    "id": "lesson_1_3",
                    "title": "Wiederholung & Meisterschaft",
                    "description": "Mentalismus und Entsprechung integrieren.",
                    "introText": "Lass uns diese beiden Fäden verweben.",
                    "exercises": [
                        {
                            "id": "ex_3_1",
                            "type": "SCENARIO",
                            "prompt": "Du willst eine Beförderung (Außen). Was ist der korrekte Ansatz?",
                            "options": [
                                "Sie verlangen, weil du hart gearbeitet hast.",
                                "Warten und hoffen, dass es jemand bemerkt.",
                                "Deine innere Einstellung mit den Qualitäten der Rolle in Einklang bringen."
                            ],
                            "correctAnswer": "Deine innere Einstellung mit den Qualitäten der Rolle in Einklang bringen.",
                            "points": 20
                        }
                    ]
                }
            ]
        }]
    }))
    .expect("fixture course is valid")
}
