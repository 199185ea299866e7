/// Per-neuron binary cross-entropy.
///
/// No clamping is applied: outputs must lie strictly inside `(0, 1)`, which a
/// sigmoid or softmax output layer guarantees. Outputs of exactly 0 or 1
/// produce infinities.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// `-(expected · ln(output) + (1 - expected) · ln(1 - output))`
    pub fn loss(output: &[f64], expected: &[f64]) -> Vec<f64> {
        output.iter().zip(expected.iter())
            .map(|(o, e)| -(e * o.ln() + (1.0 - e) * (1.0 - o).ln()))
            .collect()
    }

    /// `-(expected / output) + (1 - expected) / (1 - output)`
    pub fn derivative(output: &[f64], expected: &[f64]) -> Vec<f64> {
        output.iter().zip(expected.iter())
            .map(|(o, e)| -(e / o) + (1.0 - e) / (1.0 - o))
            .collect()
    }
}
