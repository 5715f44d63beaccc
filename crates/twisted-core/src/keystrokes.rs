use std::collections::VecDeque;

/// Sliding window over the last few keys typed outside an input field.
///
/// The window is as long as the trigger phrase, so the buffer can only ever
/// equal the phrase when the phrase was just typed in order. Named keys
/// (`arrowdown`, `enter`, ...) are appended by name and so break the phrase.
#[derive(Debug, Clone)]
pub struct KeystrokeBuffer {
    trigger: Vec<char>,
    window: VecDeque<char>,
}

impl KeystrokeBuffer {
    pub fn new(trigger: &str) -> Self {
        let trigger: Vec<char> = trigger.to_lowercase().chars().collect();
        Self {
            window: VecDeque::with_capacity(trigger.len()),
            trigger,
        }
    }

    /// Feed one character key.
    pub fn push(&mut self, key: char) -> bool {
        self.push_key(key.encode_utf8(&mut [0; 4]))
    }

    /// Feed one key by name. Returns `true` when the window matches the
    /// trigger, in which case the window has already been emptied.
    pub fn push_key(&mut self, key: &str) -> bool {
        if self.trigger.is_empty() {
            return false;
        }

        for ch in key.to_lowercase().chars() {
            if self.window.len() == self.trigger.len() {
                self.window.pop_front();
            }
            self.window.push_back(ch);
        }

        if self.window.iter().eq(self.trigger.iter()) {
            self.window.clear();
            return true;
        }
        false
    }

    pub fn contents(&self) -> String {
        self.window.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_matches_and_resets() {
        let mut buffer = KeystrokeBuffer::new("twisted");
        let hits: Vec<bool> = "twisted".chars().map(|c| buffer.push(c)).collect();
        assert_eq!(hits, vec![false, false, false, false, false, false, true]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn window_slides_past_noise() {
        let mut buffer = KeystrokeBuffer::new("twisted");
        for c in "xxxxxxxxxxtwiste".chars() {
            assert!(!buffer.push(c));
        }
        assert_eq!(buffer.contents(), "xtwiste");
        assert!(buffer.push('d'));
    }

    #[test]
    fn uppercase_is_folded() {
        let mut buffer = KeystrokeBuffer::new("twisted");
        let hit = "TWISTED".chars().map(|c| buffer.push(c)).last();
        assert_eq!(hit, Some(true));
    }

    #[test]
    fn one_altered_character_never_triggers() {
        let trigger = "twisted";
        for i in 0..trigger.len() {
            let mut altered: Vec<char> = trigger.chars().collect();
            altered[i] = if altered[i] == 'z' { 'y' } else { 'z' };
            let mut buffer = KeystrokeBuffer::new(trigger);
            assert!(altered.into_iter().all(|c| !buffer.push(c)));
        }
    }

    #[test]
    fn named_key_breaks_the_phrase() {
        let mut buffer = KeystrokeBuffer::new("twisted");
        for c in "twis".chars() {
            assert!(!buffer.push(c));
        }
        assert!(!buffer.push_key("ArrowDown"));
        assert_eq!(buffer.contents(), "rowdown");
        assert!("ted".chars().all(|c| !buffer.push(c)));
    }

    #[test]
    fn whole_key_name_enters_the_window() {
        let mut buffer = KeystrokeBuffer::new("ab");
        assert!(!buffer.push_key("Xa"));
        assert_eq!(buffer.contents(), "xa");
        assert!(buffer.push_key("xAB"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_trigger_is_inert() {
        let mut buffer = KeystrokeBuffer::new("");
        assert!(!buffer.push('a'));
        assert!(buffer.is_empty());
    }
}
