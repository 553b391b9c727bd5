//! Rule-based method recommendation, consulted before the generative backend.

/// (keyword substring, canned recommendation) pairs. Declaration order is
/// significant: the first matching entry wins.
const METHOD_RULES: &[(&str, &str)] = &[
    ("klasifikasi", "Klasifikasi (Naive Bayes, SVM, Random Forest)"),
    ("prediksi", "Regresi dan Prediksi (Linear Regression, ARIMA)"),
    ("clustering", "Clustering (K-Means, DBSCAN, Hierarchical)"),
    ("deteksi", "Deteksi Anomali (Isolation Forest, LOF)"),
    ("pengolahan citra", "Computer Vision (CNN, OpenCV)"),
    ("nlp", "Natural Language Processing (BERT, Transformers)"),
    ("deep learning", "Deep Learning (CNN, RNN, LSTM)"),
    ("optimasi", "Optimasi (Genetic Algorithm, PSO)"),
    ("keamanan", "Analisis Keamanan (Penetration Testing)"),
    ("iot", "IoT dan Sistem Embedded"),
];

/// Scans the rule table against the lowercase-joined keywords and returns the
/// first matching canned recommendation, if any.
pub fn lookup(keywords: &[String]) -> Option<&'static str> {
    let haystack = keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    METHOD_RULES
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, method)| *method)
}
