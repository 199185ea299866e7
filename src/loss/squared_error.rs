/// Per-neuron squared error, `0.5 · (output - expected)²`.
pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    pub fn loss(output: &[f64], expected: &[f64]) -> Vec<f64> {
        output.iter().zip(expected.iter())
            .map(|(o, e)| 0.5 * (o - e).powi(2))
            .collect()
    }

    /// Per-output gradient: output - expected
    pub fn derivative(output: &[f64], expected: &[f64]) -> Vec<f64> {
        output.iter().zip(expected.iter())
            .map(|(o, e)| o - e)
            .collect()
    }
}
