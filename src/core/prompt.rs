use crate::models::{Attribute, ExplanationPrompt, LearningProfile, PredictionResult};

/// Render the explanation prompt for a profile and its predicted technique
///
/// Pure and deterministic. `name` and `email` are interpolated verbatim, so
/// the result must be treated as user-influenced text.
pub fn compose(profile: &LearningProfile, prediction: &PredictionResult) -> ExplanationPrompt {
    let technique = &prediction.name;
    let mut text = String::with_capacity(1024);

    text.push_str(
        "Konteks: Saya memiliki metode belajar yang sudah ditentukan oleh model machine learning (KNN). \
         Tugas Anda adalah memberikan penjelasan yang detail dan jelas tentang metode tersebut serta \
         alasan mengapa metode ini cocok untuk user berdasarkan parameter yang diberikan.\n\n",
    );

    text.push_str("Parameter User:\n");
    text.push_str(&format!("- Nama: {}\n", profile.name));
    text.push_str(&format!("- Email: {}\n", profile.email));
    for attribute in Attribute::ALL {
        text.push_str(&format!("- {}: {}\n", attribute.prompt_label(), profile.get(attribute).label));
    }

    text.push_str(&format!(
        "\nMetode Belajar yang Direkomendasikan:\n\"{technique}\"\n\n\
         Tugas Anda:\n\
         1. Jelaskan metode belajar \"{technique}\" dengan bahasa yang mudah dipahami oleh user.\n\
         2. Berikan alasan mengapa metode belajar ini cocok untuk user berdasarkan parameter yang telah diberikan.\n\
         3. Berikan langkah-langkah implementasi metode belajar ini agar user bisa menerapkannya dalam kegiatan belajar mereka.\n"
    ));

    ExplanationPrompt::new(text)
}
