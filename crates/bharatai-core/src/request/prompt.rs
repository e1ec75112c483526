//! Prompt templates for the generative chains.

/// Vision prompt sent alongside a crop image.
pub fn crop_diagnosis(crop_type: Option<&str>) -> String {
    format!(
        "Identify disease or issue in this crop image. Crop Type: {}. \
         Suggest remedies and fertilizers.",
        crop_type.unwrap_or("Unknown")
    )
}

/// Farming recommendation request.
pub fn recommendation(
    crop_type: Option<&str>,
    soil_type: Option<&str>,
    season: Option<&str>,
    question: Option<&str>,
) -> String {
    format!(
        "You are an agricultural expert.\n\
         Provide farming recommendations for:\n\
         Crop: {}\n\
         Soil: {}\n\
         Season: {}\n\
         Question: {}.",
        crop_type.unwrap_or("Not specified"),
        soil_type.unwrap_or("Not specified"),
        season.unwrap_or("Not specified"),
        question.unwrap_or("General advice"),
    )
}

pub fn symptom_analysis(symptoms: &str) -> String {
    format!(
        "A patient reports: {symptoms}. Suggest possible causes, treatments, \
         and precautions in simple language."
    )
}

pub fn health_tips(disease: &str) -> String {
    format!("Give short and easy preventive health tips for {disease} in India.")
}
