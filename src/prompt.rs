//! Static prompt presets
//!
//! A preset supplies the instructional text for a deployment that always
//! asks the same question of its images, so callers may omit `prompt`.

use std::fmt;
use std::str::FromStr;

/// Treadmill display extraction: instructions plus the expected output schema
const WORKOUT_PROMPT: &str = r#"
You are a fitness data extraction assistant. Analyze the treadmill display image and extract the workout metrics. Look for numbers associated with distance (miles/km), calories burned, workout time (minutes/hours), speed (mph/kmh). If a metric is not visible or unclear, set it to null. Return the data in the exact JSON format specified in the schema.

If not specified in the picture, assume calories burned (= energy consumed) has the unit kcal, distances are in km, speed is in kmh. Convert the values accordingly to match the json schema.

Be very concise and ONLY return the JSON object, without any additional text or explanation. Ensure the JSON is valid and adheres to the schema.

JSON Schema:

{
	"$schema": "http://json-schema.org/draft-07/schema#",
	"title": "Workout Data",
	"type": "object",
	"properties": {
		"energy_consumed_joule": {
			"type": ["number", "null"],
			"description": "Total energy converted during workout in Joule (aka. calories burned)"
		},
		"workout_time_seconds": {
			"type": ["number", "null"],
			"description": "Total workout time in seconds"
		},
		"distance_metres": {
			"type": ["number", "null"],
			"description": "Distance covered in metres"
		},
		"speed_metres_per_second": {
			"description": "Current or average speed in metres per second",
			"type": ["number", "null"]
		},
		"confidence_level": {
			"description": "Confidence level of the extraction",
			"enum": ["high", "medium", "low"],
			"type": "string"
		}
	},
	"required": ["distance_metres", "confidence_level"],
	"additionalProperties": false
}
"#;

/// Named prompt template selectable via `RELAY_PROMPT_PRESET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPreset {
    /// Extract workout metrics from a treadmill display photo
    Workout,
}

impl PromptPreset {
    /// Instructional text sent as the first content block
    pub fn text(&self) -> &'static str {
        match self {
            PromptPreset::Workout => WORKOUT_PROMPT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PromptPreset::Workout => "workout",
        }
    }
}

impl fmt::Display for PromptPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PromptPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workout" => Ok(PromptPreset::Workout),
            other => Err(anyhow::anyhow!("unknown prompt preset: {}", other)),
        }
    }
}
