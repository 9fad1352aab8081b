use soroban_sdk::Vec;

/// Sorts ascending in place. Insertion sort: one value per provider, so
/// the input stays small.
pub fn sort_in_place(values: &mut Vec<u128>) {
    for i in 1..values.len() {
        let key = values.get_unchecked(i);
        let mut j = i;
        while j > 0 && values.get_unchecked(j - 1) > key {
            let prev = values.get_unchecked(j - 1);
            values.set(j, prev);
            j -= 1;
        }
        values.set(j, key);
    }
}

/// Mean of two values, truncated, without overflowing `u128`.
pub fn average(a: u128, b: u128) -> u128 {
    a / 2 + b / 2 + (a % 2 + b % 2) / 2
}

/// Median of an ascending-sorted, non-empty vector. For an even count this
/// is the truncated mean of the two middle values.
pub fn median_of_sorted(values: &Vec<u128>) -> Option<u128> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        values.get(n / 2)
    } else {
        let a = values.get(n / 2 - 1)?;
        let b = values.get(n / 2)?;
        Some(average(a, b))
    }
}

/// Sorts a copy of `values` and returns its median.
pub fn compute_median(values: &Vec<u128>) -> Option<u128> {
    let mut sorted = values.clone();
    sort_in_place(&mut sorted);
    median_of_sorted(&sorted)
}
