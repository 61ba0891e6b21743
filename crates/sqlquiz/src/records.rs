/// Expected row shapes for the musician challenges.
///
/// Every column a challenge checks is a top-level field regardless of which
/// table it comes from; joins are flattened rather than nested.
use sqlquiz_grader::record;

record! {
    pub struct NumberOfTrianglesRow {
        number_of_trianglers: i64 => "NumberofTrianglers",
    }
}

record! {
    pub struct MusicianRow {
        musician_id: i64 => "MusicianId",
        musician_name: String => "MusicianName",
    }
}

record! {
    pub struct InstrumentNameRow {
        instrument_name: String => "InstrumentName",
    }
}

record! {
    pub struct InstrumentRow {
        instrument_id: i64 => "InstrumentId",
        instrument_name: String => "InstrumentName",
        difficulty_id: i64 => "DifficultyId",
    }
}

impl MusicianRow {
    pub fn new(musician_id: i64, musician_name: &str) -> Self {
        Self {
            musician_id,
            musician_name: musician_name.to_string(),
        }
    }
}

impl InstrumentNameRow {
    pub fn new(instrument_name: &str) -> Self {
        Self {
            instrument_name: instrument_name.to_string(),
        }
    }
}

impl InstrumentRow {
    pub fn new(instrument_id: i64, instrument_name: &str, difficulty_id: i64) -> Self {
        Self {
            instrument_id,
            instrument_name: instrument_name.to_string(),
            difficulty_id,
        }
    }
}
