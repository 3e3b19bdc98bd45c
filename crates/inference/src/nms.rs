use crate::decoder::Detection;

/// Greedy non-maximum suppression, class-agnostic.
///
/// Repeatedly keeps the highest-scoring remaining detection and discards
/// every remaining box whose IoU with it exceeds `iou_threshold`. Output is
/// in selection order, so scores are non-increasing.
pub fn suppress(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept: Vec<Detection> = Vec::new();

    while !detections.is_empty() {
        let best = detections.remove(0);
        detections.retain(|det| iou(&best, det) <= iou_threshold);
        kept.push(best);
    }

    kept
}

/// Intersection over union of two corner-format boxes.
pub fn iou(a: &Detection, b: &Detection) -> f32 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    let area_a = (a.x2 - a.x1) * (a.y2 - a.y1);
    let area_b = (b.x2 - b.x1) * (b.y2 - b.y1);
    let union = area_a + area_b - intersection;

    if union > 0.0 { intersection / union } else { 0.0 }
}
