//! Static sample data used to seed the in-memory library.

use crate::model::{Flashcard, FlashcardList, Interest};

fn card(id: &str, list_id: &str, category: &str, question: &str, answer: &str) -> Flashcard {
    Flashcard {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        category: category.to_string(),
        list_id: list_id.to_string(),
    }
}

/// Get the sample research interests
pub fn sample_interests() -> Vec<Interest> {
    [
        ("1", "Machine Learning"),
        ("2", "React Native Development"),
        ("3", "Blockchain Technology"),
    ]
    .into_iter()
    .map(|(id, title)| Interest {
        id: id.to_string(),
        title: title.to_string(),
    })
    .collect()
}

/// Get the sample flashcard lists
pub fn sample_flashcard_lists() -> Vec<FlashcardList> {
    vec![
        FlashcardList {
            id: "1".to_string(),
            title: "React Native Basics".to_string(),
            description: "Fundamental concepts of React Native".to_string(),
            color: "#FF9500".to_string(),
            cards: vec![
                card(
                    "101",
                    "1",
                    "Development",
                    "What is React Native?",
                    "React Native is a JavaScript framework for building native mobile apps for iOS and Android.",
                ),
                card(
                    "102",
                    "1",
                    "Development",
                    "What is useState in React?",
                    "useState is a Hook that lets you add React state to function components.",
                ),
                card(
                    "103",
                    "1",
                    "Development",
                    "What is the difference between React and React Native?",
                    "React is for building web interfaces, while React Native is for building native mobile apps using React principles.",
                ),
            ],
        },
        FlashcardList {
            id: "2".to_string(),
            title: "Machine Learning Concepts".to_string(),
            description: "Key concepts in machine learning".to_string(),
            color: "#5856D6".to_string(),
            cards: vec![
                card(
                    "201",
                    "2",
                    "Machine Learning",
                    "What is a Neural Network?",
                    "A neural network is a series of algorithms that endeavors to recognize underlying relationships in a set of data through a process that mimics the way the human brain operates.",
                ),
                card(
                    "202",
                    "2",
                    "Machine Learning",
                    "What is Supervised Learning?",
                    "Supervised learning is a type of machine learning where the algorithm learns from labeled training data, helping to predict outcomes for unforeseen data.",
                ),
            ],
        },
        FlashcardList {
            id: "3".to_string(),
            title: "Blockchain Fundamentals".to_string(),
            description: "Basic concepts of blockchain technology".to_string(),
            color: "#007AFF".to_string(),
            cards: vec![
                card(
                    "301",
                    "3",
                    "Blockchain",
                    "What is Blockchain?",
                    "A blockchain is a distributed database or ledger shared among computer network nodes that stores information electronically in digital format.",
                ),
                card(
                    "302",
                    "3",
                    "Blockchain",
                    "What is a Smart Contract?",
                    "A smart contract is a self-executing contract with the terms directly written into code, automatically enforcing obligations when predetermined conditions are met.",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let lists = sample_flashcard_lists();
        let list_ids: HashSet<_> = lists.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(list_ids.len(), lists.len());

        let card_ids: HashSet<_> = lists
            .iter()
            .flat_map(|l| l.cards.iter().map(|c| c.id.as_str()))
            .collect();
        assert_eq!(card_ids.len(), 7);

        let interests = sample_interests();
        let interest_ids: HashSet<_> = interests.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(interest_ids.len(), interests.len());
    }

    #[test]
    fn test_sample_cards_reference_parent_list() {
        for list in sample_flashcard_lists() {
            assert!(list.cards_belong_to_list(), "list {} is inconsistent", list.id);
        }
    }
}
