use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub fn generate_30_alphanumeric() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(30).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_30_alphanumeric_chars() {
        let id = generate_30_alphanumeric();
        assert_eq!(id.len(), 30);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
