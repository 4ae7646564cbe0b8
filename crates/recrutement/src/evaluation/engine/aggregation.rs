use super::super::domain::{
    FaceToFaceScores, FaceToFaceSubmission, SimulationScores, SimulationSubmission,
};

/// Arithmetic mean, `None` when there is nothing to average.
pub fn average(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

fn criterion_average<T>(items: &[T], score: impl Fn(&T) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = items.iter().filter_map(score).collect();
    average(&values)
}

/// Per-criterion means over the jury grids. Optional criteria are averaged only over
/// the jury members who rated them.
pub fn aggregate_face_to_face(submissions: &[FaceToFaceSubmission]) -> Option<FaceToFaceScores> {
    if submissions.is_empty() {
        return None;
    }

    Some(FaceToFaceScores {
        voice_quality: criterion_average(submissions, |s| Some(s.voice_quality)),
        verbal_communication: criterion_average(submissions, |s| Some(s.verbal_communication)),
        presentation_visuelle: criterion_average(submissions, |s| s.presentation_visuelle),
        appetence_digitale: criterion_average(submissions, |s| s.appetence_digitale),
    })
}

pub fn aggregate_simulation(submissions: &[SimulationSubmission]) -> Option<SimulationScores> {
    if submissions.is_empty() {
        return None;
    }

    Some(SimulationScores {
        sens_negociation: criterion_average(submissions, |s| Some(s.sens_negociation)),
        capacite_persuasion: criterion_average(submissions, |s| Some(s.capacite_persuasion)),
        sens_combativite: criterion_average(submissions, |s| Some(s.sens_combativite)),
    })
}
