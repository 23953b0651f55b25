use image::{GrayImage, ImageBuffer, Luma};

/// Crops to the leftmost `fraction` of the image width, full height.
///
/// The fraction is clamped to 0.0–1.0; a zero-width result is possible for tiny inputs.
pub fn crop_left_fraction(img: &GrayImage, fraction: f32) -> GrayImage {
    let (w, h) = img.dimensions();
    let keep = ((w as f32 * fraction.clamp(0.0, 1.0)) as u32).min(w);
    image::imageops::crop_imm(img, 0, 0, keep, h).to_image()
}

/// Local adaptive-mean binarization.
///
/// Each pixel is compared with the mean of the `block_size` × `block_size`
/// neighbourhood around it (clipped at the image borders). Pixels brighter
/// than `mean - offset` become white (255), all others black (0).
///
/// `block_size` is forced odd and at least 3.
pub fn adaptive_mean_threshold(img: &GrayImage, block_size: u32, offset: i32) -> GrayImage {
    let (width, height) = img.dimensions();
    let block = block_size.max(3) | 1;
    let radius = block / 2;

    let integral = integral_image(img);
    let stride = width as usize + 1;
    let sum_at = |x: u32, y: u32| integral[y as usize * stride + x as usize];

    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = (x + radius + 1).min(width);
        let y1 = (y + radius + 1).min(height);

        let area = ((x1 - x0) * (y1 - y0)) as u64;
        let sum = sum_at(x1, y1) + sum_at(x0, y0) - sum_at(x0, y1) - sum_at(x1, y0);
        let mean = (sum as f64 / area as f64).round() as i32;

        let value = if pixel[0] as i32 > mean - offset {
            255u8
        } else {
            0u8
        };

        output.put_pixel(x, y, Luma([value]));
    }

    output
}

/// Summed-area table with a zero row and column in front.
fn integral_image(img: &GrayImage) -> Vec<u64> {
    let (width, height) = img.dimensions();
    let stride = width as usize + 1;
    let mut table = vec![0u64; stride * (height as usize + 1)];

    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += img.get_pixel(x as u32, y as u32)[0] as u64;
            table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
        }
    }

    table
}

/// Full preprocessing used before recognition: left crop then binarization.
pub fn prepare_for_ocr(img: &GrayImage, fraction: f32, block_size: u32, offset: i32) -> GrayImage {
    let cropped = crop_left_fraction(img, fraction);
    adaptive_mean_threshold(&cropped, block_size, offset)
}
